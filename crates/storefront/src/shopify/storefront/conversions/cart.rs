//! Cart type conversion functions.

use soap_store_core::{CartId, CartLineId, MerchandiseId, ProductId};
use tracing::warn;

use crate::shopify::ShopifyError;
use crate::shopify::types::{
    Attribute, Cart, CartCost, CartDiscountCode, CartLine, CartLineCost, CartMerchandise,
    CartMerchandiseProduct, CartUserError, SelectedOption,
};

use super::super::queries::{
    CartCostFields, CartFields, CartLineCostFields, CartLineFields, CartMerchandiseFields,
    CartUserErrorFields,
};
use super::{convert_image, convert_money};

/// Convert the `CartApiQuery` fragment into a [`Cart`].
///
/// Lines whose IDs are not the expected global ID types are dropped with a
/// warning; a malformed cart ID fails the whole conversion.
///
/// # Errors
///
/// Returns [`ShopifyError::InvalidId`] if the cart ID is malformed.
pub fn convert_cart(cart: CartFields) -> Result<Cart, ShopifyError> {
    let id = CartId::parse(&cart.id)?;

    Ok(Cart {
        id,
        checkout_url: cart.checkout_url,
        updated_at: cart.updated_at,
        note: cart.note,
        total_quantity: u32::try_from(cart.total_quantity).unwrap_or(0),
        cost: cart.cost.map(convert_cart_cost).unwrap_or_default(),
        discount_codes: cart
            .discount_codes
            .into_iter()
            .map(|d| CartDiscountCode {
                code: d.code,
                applicable: d.applicable,
            })
            .collect(),
        lines: cart
            .lines
            .nodes
            .into_iter()
            .filter_map(convert_cart_line)
            .collect(),
    })
}

fn convert_cart_cost(cost: CartCostFields) -> CartCost {
    CartCost {
        subtotal: cost.subtotal_amount.map(convert_money),
        total: cost.total_amount.map(convert_money),
        total_tax: cost.total_tax_amount.map(convert_money),
        total_duty: cost.total_duty_amount.map(convert_money),
    }
}

fn convert_cart_line(line: CartLineFields) -> Option<CartLine> {
    let id = match CartLineId::parse(&line.id) {
        Ok(id) => id,
        Err(e) => {
            warn!(line_id = %line.id, "Skipping cart line: {e}");
            return None;
        }
    };

    let merchandise = convert_merchandise(line.merchandise)?;

    Some(CartLine {
        id,
        quantity: u32::try_from(line.quantity).unwrap_or(0),
        attributes: line
            .attributes
            .into_iter()
            .map(|a| Attribute {
                key: a.key,
                value: a.value,
            })
            .collect(),
        cost: line.cost.map(convert_line_cost).unwrap_or_default(),
        merchandise,
    })
}

fn convert_line_cost(cost: CartLineCostFields) -> CartLineCost {
    CartLineCost {
        amount_per_quantity: cost.amount_per_quantity.map(convert_money),
        compare_at_amount_per_quantity: cost.compare_at_amount_per_quantity.map(convert_money),
        subtotal_amount: cost.subtotal_amount.map(convert_money),
        total_amount: cost.total_amount.map(convert_money),
    }
}

fn convert_merchandise(v: CartMerchandiseFields) -> Option<CartMerchandise> {
    let (id, product_id) = match (
        MerchandiseId::parse(&v.id),
        ProductId::parse(&v.product.id),
    ) {
        (Ok(id), Ok(product_id)) => (id, product_id),
        (Err(e), _) | (_, Err(e)) => {
            warn!(merchandise_id = %v.id, "Skipping cart line merchandise: {e}");
            return None;
        }
    };

    Some(CartMerchandise {
        id,
        title: v.title,
        available_for_sale: v.available_for_sale,
        requires_shipping: v.requires_shipping,
        price: v.price.map(convert_money),
        compare_at_price: v.compare_at_price.map(convert_money),
        selected_options: v
            .selected_options
            .into_iter()
            .map(|o| SelectedOption {
                name: o.name,
                value: o.value,
            })
            .collect(),
        image: v.image.map(convert_image),
        product: CartMerchandiseProduct {
            id: product_id,
            handle: v.product.handle,
            title: v.product.title,
            vendor: v.product.vendor,
        },
    })
}

/// Convert mutation `userErrors`.
pub fn convert_user_errors(errors: Vec<CartUserErrorFields>) -> Vec<CartUserError> {
    errors
        .into_iter()
        .map(|e| CartUserError {
            code: e.code,
            field: e.field,
            message: e.message,
        })
        .collect()
}
