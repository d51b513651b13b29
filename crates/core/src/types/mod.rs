//! Core types for the storefront.
//!
//! This module provides type-safe wrappers for the values the storefront
//! passes back and forth with Shopify.

pub mod id;
pub mod price;
pub mod quantity;

pub use id::*;
pub use price::{CurrencyCode, Price, PriceError};
pub use quantity::LineQuantity;
