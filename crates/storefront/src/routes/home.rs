//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use super::ImageView;
use super::layout::LayoutView;
use crate::filters;
use crate::middleware::CspNonce;
use crate::models::CartAction;
use crate::shopify::types::{CartLineInput, CollectionSummary, ProductSummary};
use crate::state::AppState;

/// Number of products in the "Featured Products" grid.
const RECOMMENDED_PRODUCTS_COUNT: i64 = 8;

// =============================================================================
// Hero
// =============================================================================

/// Static hero banner.
#[derive(Clone, Debug)]
pub struct HeroView {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub desktop_image: &'static str,
    pub mobile_image: &'static str,
}

impl Default for HeroView {
    fn default() -> Self {
        Self {
            title: "Redefining your soap.",
            subtitle: "Introducing a soap that will take you away from shower gel...",
            desktop_image: "/static/images/hero.jpg",
            mobile_image: "/static/images/mobile-hero.png",
        }
    }
}

// =============================================================================
// Product and Collection Views
// =============================================================================

/// Product card display data for templates.
#[derive(Clone, Debug)]
pub struct ProductView {
    pub title: String,
    pub url: String,
    pub price: Option<String>,
    pub image: Option<ImageView>,
    /// `cartFormInput` adding one of the first variant; `None` when it
    /// can't be bought.
    pub quick_add_input: Option<String>,
}

impl From<&ProductSummary> for ProductView {
    fn from(product: &ProductSummary) -> Self {
        let quick_add_input = product
            .first_variant
            .as_ref()
            .filter(|v| v.available_for_sale)
            .map(|v| {
                CartAction::LinesAdd {
                    lines: vec![CartLineInput {
                        merchandise_id: v.id.clone(),
                        quantity: 1,
                    }],
                }
                .to_form_value()
            });

        Self {
            title: product.title.clone(),
            url: format!("/products/{}", product.handle),
            price: product
                .price_range
                .min_variant_price
                .to_price()
                .map(|p| p.display()),
            image: product
                .image
                .as_ref()
                .map(|img| ImageView::new(img, &product.title)),
            quick_add_input,
        }
    }
}

/// Featured collection display data.
#[derive(Clone, Debug)]
pub struct CollectionView {
    pub title: String,
    pub url: String,
    pub image: Option<ImageView>,
}

impl From<&CollectionSummary> for CollectionView {
    fn from(collection: &CollectionSummary) -> Self {
        Self {
            title: collection.title.clone(),
            url: format!("/collections/{}", collection.handle),
            image: collection
                .image
                .as_ref()
                .map(|img| ImageView::new(img, &collection.title)),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: LayoutView,
    pub hero: HeroView,
    pub featured_collection: Option<CollectionView>,
    pub products: Vec<ProductView>,
}

/// Display the home page.
///
/// The featured collection and recommended products are fetched
/// concurrently; either failing degrades to an empty section.
#[instrument(skip(state, nonce))]
pub async fn home(State(state): State<AppState>, CspNonce(nonce): CspNonce) -> impl IntoResponse {
    let storefront = state.storefront();

    let (layout, featured, recommended) = tokio::join!(
        LayoutView::load(&state, "/", nonce),
        storefront.get_featured_collection(),
        storefront.get_recommended_products(RECOMMENDED_PRODUCTS_COUNT),
    );

    let featured_collection = featured.map_or_else(
        |e| {
            tracing::error!("Failed to fetch featured collection: {e}");
            None
        },
        |collection| collection.as_ref().map(CollectionView::from),
    );

    let products = recommended.map_or_else(
        |e| {
            tracing::error!("Failed to fetch recommended products: {e}");
            Vec::new()
        },
        |products| products.iter().map(ProductView::from).collect(),
    );

    HomeTemplate {
        layout,
        hero: HeroView::default(),
        featured_collection,
        products,
    }
}
