//! Type conversion functions for Shopify Storefront API responses.

pub mod cart;
pub mod header;
pub mod products;

pub use cart::{convert_cart, convert_user_errors};
pub use header::convert_header;
pub use products::{convert_featured_collection, convert_recommended_products};

use crate::shopify::types::{Image, Money};

use super::queries::{ImageFields, MoneyFields};

fn convert_money(m: MoneyFields) -> Money {
    Money {
        amount: m.amount,
        currency_code: m.currency_code,
    }
}

fn convert_image(i: ImageFields) -> Image {
    Image {
        id: i.id,
        url: i.url,
        alt_text: i.alt_text,
        width: i.width,
        height: i.height,
    }
}
