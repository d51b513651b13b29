//! Soap Store Core - Shared value types.
//!
//! This crate provides the small value types used across the workspace:
//! - `storefront` - Public-facing storefront server
//! - `cli` - Command-line tools for migrations and connectivity checks
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. Everything with real business meaning
//! (pricing, inventory, discounts) belongs to Shopify; these types only carry
//! and format what Shopify returns.
//!
//! # Modules
//!
//! - [`types`] - Shopify global IDs, prices, and line quantities

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
