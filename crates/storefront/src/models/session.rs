//! Session-related types.
//!
//! The session holds the visitor's Shopify cart ID and, briefly, errors from
//! the last cart mutation. Everything else is fetched from Shopify on demand.

/// Session keys.
pub mod keys {
    /// Key for storing the Shopify cart ID.
    pub const CART_ID: &str = "cart_id";

    /// Key for cart errors awaiting display after a non-HTMX form post.
    pub const CART_ERRORS: &str = "cart_errors";
}
