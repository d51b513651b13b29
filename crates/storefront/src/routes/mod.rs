//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//!
//! # Cart
//! GET  /cart                   - Cart page
//! POST /cart                   - Cart form actions (rate limited)
//! GET  /cart/count             - Cart count badge (HTMX fragment)
//! GET  /cart/drawer            - Cart drawer contents (HTMX fragment)
//! ```
//!
//! Health checks and `/static` are mounted in the binary.

pub mod cart;
pub mod home;
pub mod layout;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::cart_rate_limiter;
use crate::shopify::types::Image;
use crate::state::AppState;

/// Image display data for templates.
#[derive(Clone, Debug)]
pub struct ImageView {
    pub url: String,
    pub alt: String,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

impl ImageView {
    /// Image with `fallback_alt` used when Shopify has no alt text.
    #[must_use]
    pub fn new(image: &Image, fallback_alt: &str) -> Self {
        Self {
            url: image.url.clone(),
            alt: image
                .alt_text
                .clone()
                .filter(|alt| !alt.is_empty())
                .unwrap_or_else(|| fallback_alt.to_string()),
            width: image.width,
            height: image.height,
        }
    }

    /// `width`/`height` attributes for `<img>`, empty unless both are known.
    #[must_use]
    pub fn size_attrs(&self) -> String {
        match (self.width, self.height) {
            (Some(width), Some(height)) => format!(r#"width="{width}" height="{height}""#),
            _ => String::new(),
        }
    }
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(cart::show).merge(post(cart::action).layer(cart_rate_limiter())),
        )
        .route("/count", get(cart::count))
        .route("/drawer", get(cart::drawer))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Cart routes
        .nest("/cart", cart_routes())
}
