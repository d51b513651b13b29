//! Soap Store storefront library.
//!
//! Server-rendered storefront over the Shopify Storefront API: header and
//! navigation, cart drawer and cart page, hero banner, and homepage product
//! listing. The binary in `main.rs` wires these modules into an Axum server;
//! keeping them in a library lets them be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod shopify;
pub mod state;
