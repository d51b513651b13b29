//! Domain types for Shopify Storefront API.
//!
//! These types provide a clean, ergonomic API separate from the raw
//! response shapes in `storefront::queries`.

use serde::{Deserialize, Serialize};
use soap_store_core::{CartId, CartLineId, MerchandiseId, Price, ProductId};

// =============================================================================
// Money Types
// =============================================================================

/// Monetary amount with currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Decimal amount as string (preserves precision).
    pub amount: String,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

impl Money {
    /// Parse into a typed [`Price`].
    ///
    /// Returns `None` (and logs) when Shopify sends something unparseable, so
    /// callers can omit the price instead of failing the page.
    #[must_use]
    pub fn to_price(&self) -> Option<Price> {
        if !self.has_amount() {
            return None;
        }
        match Price::parse(&self.amount, &self.currency_code) {
            Ok(price) => Some(price),
            Err(e) => {
                tracing::warn!(amount = %self.amount, currency = %self.currency_code, "Unparseable money: {e}");
                None
            }
        }
    }

    /// Whether the amount is present (non-empty).
    #[must_use]
    pub fn has_amount(&self) -> bool {
        !self.amount.trim().is_empty()
    }
}

/// Price range for a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRange {
    /// Minimum price among all variants.
    pub min_variant_price: Money,
}

// =============================================================================
// Image Types
// =============================================================================

/// Product, variant, or collection image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    /// Shopify image ID.
    pub id: Option<String>,
    /// Image URL.
    pub url: String,
    /// Alt text for accessibility.
    pub alt_text: Option<String>,
    /// Image width in pixels.
    pub width: Option<i64>,
    /// Image height in pixels.
    pub height: Option<i64>,
}

// =============================================================================
// Shop and Menu Types
// =============================================================================

/// Shop identity shown in the header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shop {
    /// Shop name.
    pub name: String,
    /// Primary domain URL (e.g., `https://soap.example`).
    pub primary_domain_url: String,
}

/// A navigation menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Menu item ID.
    pub id: String,
    /// Linked resource ID (page, collection, ...), if any.
    pub resource_id: Option<String>,
    /// Item tags.
    pub tags: Vec<String>,
    /// Link text.
    pub title: String,
    /// Item type (`HTTP`, `PAGE`, `COLLECTION`, ...).
    pub kind: String,
    /// Absolute or relative URL. Items without one are not rendered.
    pub url: Option<String>,
    /// Child items.
    pub items: Vec<MenuItem>,
}

/// A navigation menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    /// Menu ID.
    pub id: String,
    /// Top-level items.
    pub items: Vec<MenuItem>,
}

/// Data for the site header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderData {
    /// Shop identity.
    pub shop: Shop,
    /// Header menu; `None` when the handle does not exist in the shop.
    pub menu: Option<Menu>,
}

// =============================================================================
// Homepage Product Types
// =============================================================================

/// First variant of a product, used for quick add-to-cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantSummary {
    /// Variant ID.
    pub id: MerchandiseId,
    /// Whether this variant can be purchased.
    pub available_for_sale: bool,
}

/// A product as listed on the homepage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSummary {
    /// Product ID.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// URL handle.
    pub handle: String,
    /// Price range across variants.
    pub price_range: PriceRange,
    /// First product image.
    pub image: Option<Image>,
    /// First variant.
    pub first_variant: Option<VariantSummary>,
}

/// The most recently updated collection, shown as a featured block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionSummary {
    /// Collection ID.
    pub id: String,
    /// Collection title.
    pub title: String,
    /// URL handle.
    pub handle: String,
    /// Collection image.
    pub image: Option<Image>,
}

// =============================================================================
// Cart Types
// =============================================================================

/// Custom attribute (key-value pair).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute key.
    pub key: String,
    /// Attribute value.
    pub value: Option<String>,
}

/// Selected option on a product variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedOption {
    /// Option name (e.g., "Scent").
    pub name: String,
    /// Selected value (e.g., "Lavender").
    pub value: String,
}

/// Merchandise in a cart line (simplified product variant info).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartMerchandise {
    /// Variant ID.
    pub id: MerchandiseId,
    /// Variant title.
    pub title: String,
    /// Whether available for sale.
    pub available_for_sale: bool,
    /// Whether requires shipping.
    pub requires_shipping: bool,
    /// Current price.
    pub price: Option<Money>,
    /// Compare-at price.
    pub compare_at_price: Option<Money>,
    /// Selected options.
    pub selected_options: Vec<SelectedOption>,
    /// Variant image.
    pub image: Option<Image>,
    /// Parent product info.
    pub product: CartMerchandiseProduct,
}

/// Simplified product info for cart merchandise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartMerchandiseProduct {
    /// Product ID.
    pub id: ProductId,
    /// Product handle.
    pub handle: String,
    /// Product title.
    pub title: String,
    /// Vendor.
    pub vendor: String,
}

/// Cost for a cart line.
///
/// Every amount is optional: the drawer omits the price rather than failing
/// when Shopify leaves one out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartLineCost {
    /// Price per unit.
    pub amount_per_quantity: Option<Money>,
    /// Compare-at price per unit.
    pub compare_at_amount_per_quantity: Option<Money>,
    /// Subtotal (before discounts).
    pub subtotal_amount: Option<Money>,
    /// Total (after discounts).
    pub total_amount: Option<Money>,
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// Cart line ID.
    pub id: CartLineId,
    /// Quantity.
    pub quantity: u32,
    /// Custom attributes.
    pub attributes: Vec<Attribute>,
    /// Line cost.
    pub cost: CartLineCost,
    /// Product variant.
    pub merchandise: CartMerchandise,
}

/// Cart cost summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartCost {
    /// Subtotal before tax/shipping.
    pub subtotal: Option<Money>,
    /// Total amount.
    pub total: Option<Money>,
    /// Total tax amount.
    pub total_tax: Option<Money>,
    /// Total duty amount.
    pub total_duty: Option<Money>,
}

/// Discount code applied to cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartDiscountCode {
    /// The discount code.
    pub code: String,
    /// Whether the code is applicable.
    pub applicable: bool,
}

/// A shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    /// Cart ID.
    pub id: CartId,
    /// Checkout URL.
    pub checkout_url: String,
    /// Last update timestamp.
    pub updated_at: Option<String>,
    /// Cart note.
    pub note: Option<String>,
    /// Total item quantity.
    pub total_quantity: u32,
    /// Cart cost summary.
    pub cost: CartCost,
    /// Applied discount codes.
    pub discount_codes: Vec<CartDiscountCode>,
    /// Cart lines.
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Codes Shopify reports as applicable, in cart order.
    #[must_use]
    pub fn applicable_discount_codes(&self) -> Vec<String> {
        self.discount_codes
            .iter()
            .filter(|d| d.applicable)
            .map(|d| d.code.clone())
            .collect()
    }
}

/// Input for adding a line to cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineInput {
    /// Product variant ID.
    pub merchandise_id: MerchandiseId,
    /// Quantity to add.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

/// Input for updating a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineUpdateInput {
    /// Cart line ID.
    pub id: CartLineId,
    /// New quantity. Zero removes the line.
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

/// User error from cart mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartUserError {
    /// Error code.
    pub code: Option<String>,
    /// Field path that caused the error.
    pub field: Option<Vec<String>>,
    /// Human-readable error message.
    pub message: String,
}
