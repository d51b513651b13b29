//! GraphQL operation definitions for Shopify Storefront API.
//!
//! Each operation is a unit struct implementing [`GraphQLQuery`] by hand, with
//! its `Variables` and `ResponseData` in a snake-case module of the same name
//! (the layout `graphql_client` codegen would produce). Response shapes only
//! cover the fields the documents select.

use graphql_client::{GraphQLQuery, QueryBody};
use serde::{Deserialize, Serialize};

// =============================================================================
// Documents
// =============================================================================

macro_rules! money_fragment {
    () => {
        r"
fragment Money on MoneyV2 {
  currencyCode
  amount
}
"
    };
}

macro_rules! cart_fragment {
    () => {
        r"
fragment CartLine on BaseCartLine {
  id
  quantity
  attributes {
    key
    value
  }
  cost {
    totalAmount {
      ...Money
    }
    amountPerQuantity {
      ...Money
    }
    compareAtAmountPerQuantity {
      ...Money
    }
    subtotalAmount {
      ...Money
    }
  }
  merchandise {
    ... on ProductVariant {
      id
      availableForSale
      compareAtPrice {
        ...Money
      }
      price {
        ...Money
      }
      requiresShipping
      title
      image {
        id
        url
        altText
        width
        height
      }
      product {
        id
        handle
        title
        vendor
      }
      selectedOptions {
        name
        value
      }
    }
  }
}
fragment CartApiQuery on Cart {
  id
  checkoutUrl
  totalQuantity
  note
  updatedAt
  lines(first: $numCartLines) {
    nodes {
      ...CartLine
    }
  }
  cost {
    subtotalAmount {
      ...Money
    }
    totalAmount {
      ...Money
    }
    totalDutyAmount {
      ...Money
    }
    totalTaxAmount {
      ...Money
    }
  }
  discountCodes {
    code
    applicable
  }
}
fragment CartUserError on CartUserError {
  code
  field
  message
}
"
    };
}

const HEADER_QUERY: &str = r"
query Header($headerMenuHandle: String!) {
  shop {
    name
    primaryDomain {
      url
    }
  }
  menu(handle: $headerMenuHandle) {
    id
    items {
      ...MenuItem
      items {
        ...MenuItem
      }
    }
  }
}
fragment MenuItem on MenuItem {
  id
  resourceId
  tags
  title
  type
  url
}
";

const FEATURED_COLLECTION_QUERY: &str = r"
query FeaturedCollection {
  collections(first: 1, sortKey: UPDATED_AT, reverse: true) {
    nodes {
      id
      title
      handle
      image {
        id
        url
        altText
        width
        height
      }
    }
  }
}
";

const RECOMMENDED_PRODUCTS_QUERY: &str = concat!(
    r"
query RecommendedProducts($first: Int!) {
  products(first: $first, sortKey: UPDATED_AT, reverse: true) {
    nodes {
      id
      title
      handle
      priceRange {
        minVariantPrice {
          ...Money
        }
      }
      images(first: 1) {
        nodes {
          id
          url
          altText
          width
          height
        }
      }
      variants(first: 1) {
        nodes {
          id
          availableForSale
        }
      }
    }
  }
}
",
    money_fragment!()
);

const CART_QUERY: &str = concat!(
    r"
query CartQuery($cartId: ID!, $numCartLines: Int = 100) {
  cart(id: $cartId) {
    ...CartApiQuery
  }
}
",
    cart_fragment!(),
    money_fragment!()
);

const CART_CREATE_MUTATION: &str = concat!(
    r"
mutation CartCreate($input: CartInput!, $numCartLines: Int = 100) {
  cartCreate(input: $input) {
    cart {
      ...CartApiQuery
    }
    userErrors {
      ...CartUserError
    }
  }
}
",
    cart_fragment!(),
    money_fragment!()
);

const CART_LINES_ADD_MUTATION: &str = concat!(
    r"
mutation CartLinesAdd($cartId: ID!, $lines: [CartLineInput!]!, $numCartLines: Int = 100) {
  cartLinesAdd(cartId: $cartId, lines: $lines) {
    cart {
      ...CartApiQuery
    }
    userErrors {
      ...CartUserError
    }
  }
}
",
    cart_fragment!(),
    money_fragment!()
);

const CART_LINES_UPDATE_MUTATION: &str = concat!(
    r"
mutation CartLinesUpdate($cartId: ID!, $lines: [CartLineUpdateInput!]!, $numCartLines: Int = 100) {
  cartLinesUpdate(cartId: $cartId, lines: $lines) {
    cart {
      ...CartApiQuery
    }
    userErrors {
      ...CartUserError
    }
  }
}
",
    cart_fragment!(),
    money_fragment!()
);

const CART_LINES_REMOVE_MUTATION: &str = concat!(
    r"
mutation CartLinesRemove($cartId: ID!, $lineIds: [ID!]!, $numCartLines: Int = 100) {
  cartLinesRemove(cartId: $cartId, lineIds: $lineIds) {
    cart {
      ...CartApiQuery
    }
    userErrors {
      ...CartUserError
    }
  }
}
",
    cart_fragment!(),
    money_fragment!()
);

const CART_DISCOUNT_CODES_UPDATE_MUTATION: &str = concat!(
    r"
mutation CartDiscountCodesUpdate($cartId: ID!, $discountCodes: [String!], $numCartLines: Int = 100) {
  cartDiscountCodesUpdate(cartId: $cartId, discountCodes: $discountCodes) {
    cart {
      ...CartApiQuery
    }
    userErrors {
      ...CartUserError
    }
  }
}
",
    cart_fragment!(),
    money_fragment!()
);

// =============================================================================
// Operation Structs
// =============================================================================

macro_rules! storefront_operation {
    ($name:ident, $module:ident, $operation:literal, $document:expr) => {
        pub struct $name;

        impl GraphQLQuery for $name {
            type Variables = $module::Variables;
            type ResponseData = $module::ResponseData;

            fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
                QueryBody {
                    variables,
                    query: $document,
                    operation_name: $operation,
                }
            }
        }
    };
}

storefront_operation!(Header, header, "Header", HEADER_QUERY);
storefront_operation!(
    FeaturedCollection,
    featured_collection,
    "FeaturedCollection",
    FEATURED_COLLECTION_QUERY
);
storefront_operation!(
    RecommendedProducts,
    recommended_products,
    "RecommendedProducts",
    RECOMMENDED_PRODUCTS_QUERY
);
storefront_operation!(GetCart, get_cart, "CartQuery", CART_QUERY);
storefront_operation!(CreateCart, create_cart, "CartCreate", CART_CREATE_MUTATION);
storefront_operation!(AddToCart, add_to_cart, "CartLinesAdd", CART_LINES_ADD_MUTATION);
storefront_operation!(
    UpdateCartLines,
    update_cart_lines,
    "CartLinesUpdate",
    CART_LINES_UPDATE_MUTATION
);
storefront_operation!(
    RemoveFromCart,
    remove_from_cart,
    "CartLinesRemove",
    CART_LINES_REMOVE_MUTATION
);
storefront_operation!(
    UpdateCartDiscountCodes,
    update_cart_discount_codes,
    "CartDiscountCodesUpdate",
    CART_DISCOUNT_CODES_UPDATE_MUTATION
);

// =============================================================================
// Shared Response Shapes
// =============================================================================

/// `MoneyV2` fields selected by the `Money` fragment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyFields {
    pub amount: String,
    pub currency_code: String,
}

/// Image fields selected everywhere an image is requested.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFields {
    pub id: Option<String>,
    pub url: String,
    pub alt_text: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

/// Relay-style `nodes` list.
#[derive(Debug, Clone, Deserialize)]
pub struct Nodes<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

/// Fields selected by the `CartApiQuery` fragment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartFields {
    pub id: String,
    #[serde(default)]
    pub checkout_url: String,
    #[serde(default)]
    pub total_quantity: i64,
    pub note: Option<String>,
    pub updated_at: Option<String>,
    pub lines: Nodes<CartLineFields>,
    pub cost: Option<CartCostFields>,
    #[serde(default)]
    pub discount_codes: Vec<DiscountCodeFields>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCostFields {
    pub subtotal_amount: Option<MoneyFields>,
    pub total_amount: Option<MoneyFields>,
    pub total_duty_amount: Option<MoneyFields>,
    pub total_tax_amount: Option<MoneyFields>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscountCodeFields {
    pub code: String,
    pub applicable: bool,
}

/// Fields selected by the `CartLine` fragment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineFields {
    pub id: String,
    pub quantity: i64,
    #[serde(default)]
    pub attributes: Vec<AttributeFields>,
    pub cost: Option<CartLineCostFields>,
    pub merchandise: CartMerchandiseFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AttributeFields {
    pub key: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineCostFields {
    pub total_amount: Option<MoneyFields>,
    pub amount_per_quantity: Option<MoneyFields>,
    pub compare_at_amount_per_quantity: Option<MoneyFields>,
    pub subtotal_amount: Option<MoneyFields>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartMerchandiseFields {
    pub id: String,
    #[serde(default)]
    pub available_for_sale: bool,
    pub compare_at_price: Option<MoneyFields>,
    pub price: Option<MoneyFields>,
    #[serde(default)]
    pub requires_shipping: bool,
    #[serde(default)]
    pub title: String,
    pub image: Option<ImageFields>,
    pub product: CartMerchandiseProductFields,
    #[serde(default)]
    pub selected_options: Vec<SelectedOptionFields>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartMerchandiseProductFields {
    pub id: String,
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub vendor: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectedOptionFields {
    pub name: String,
    pub value: String,
}

/// Fields selected by the `CartUserError` fragment.
#[derive(Debug, Clone, Deserialize)]
pub struct CartUserErrorFields {
    pub code: Option<String>,
    pub field: Option<Vec<String>>,
    pub message: String,
}

/// Payload shared by every cart mutation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartMutationPayload {
    pub cart: Option<CartFields>,
    #[serde(default)]
    pub user_errors: Vec<CartUserErrorFields>,
}

// =============================================================================
// Operation Modules
// =============================================================================

pub mod header {
    use super::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub header_menu_handle: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub shop: ShopFields,
        pub menu: Option<MenuFields>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ShopFields {
        pub name: String,
        pub primary_domain: PrimaryDomainFields,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct PrimaryDomainFields {
        pub url: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct MenuFields {
        pub id: String,
        #[serde(default)]
        pub items: Vec<MenuItemFields>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MenuItemFields {
        pub id: String,
        pub resource_id: Option<String>,
        #[serde(default)]
        pub tags: Vec<String>,
        pub title: String,
        #[serde(rename = "type", default)]
        pub kind: String,
        pub url: Option<String>,
        #[serde(default)]
        pub items: Vec<MenuItemFields>,
    }
}

pub mod featured_collection {
    use super::{Deserialize, ImageFields, Nodes, Serialize};

    #[derive(Debug, Clone, Default, Serialize)]
    pub struct Variables {}

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub collections: Nodes<CollectionFields>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct CollectionFields {
        pub id: String,
        pub title: String,
        pub handle: String,
        pub image: Option<ImageFields>,
    }
}

pub mod recommended_products {
    use super::{Deserialize, ImageFields, MoneyFields, Nodes, Serialize};

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub first: i64,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub products: Nodes<ProductFields>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductFields {
        pub id: String,
        pub title: String,
        pub handle: String,
        pub price_range: PriceRangeFields,
        pub images: Nodes<ImageFields>,
        pub variants: Nodes<VariantFields>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PriceRangeFields {
        pub min_variant_price: MoneyFields,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct VariantFields {
        pub id: String,
        #[serde(default)]
        pub available_for_sale: bool,
    }
}

pub mod get_cart {
    use super::{CartFields, Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub cart: Option<CartFields>,
    }
}

pub mod create_cart {
    use super::{CartMutationPayload, Deserialize, Serialize};
    use crate::shopify::types::CartLineInput;

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub input: CartInput,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct CartInput {
        pub lines: Vec<CartLineInput>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub cart_create: Option<CartMutationPayload>,
    }
}

pub mod add_to_cart {
    use super::{CartMutationPayload, Deserialize, Serialize};
    use crate::shopify::types::CartLineInput;

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
        pub lines: Vec<CartLineInput>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub cart_lines_add: Option<CartMutationPayload>,
    }
}

pub mod update_cart_lines {
    use super::{CartMutationPayload, Deserialize, Serialize};
    use crate::shopify::types::CartLineUpdateInput;

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
        pub lines: Vec<CartLineUpdateInput>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub cart_lines_update: Option<CartMutationPayload>,
    }
}

pub mod remove_from_cart {
    use super::{CartMutationPayload, Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
        pub line_ids: Vec<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub cart_lines_remove: Option<CartMutationPayload>,
    }
}

pub mod update_cart_discount_codes {
    use super::{CartMutationPayload, Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
        pub discount_codes: Vec<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub cart_discount_codes_update: Option<CartMutationPayload>,
    }
}
