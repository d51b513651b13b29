//! Cache types for Storefront API responses.
//!
//! Only read-mostly catalog data is cached. Carts are never cached: they
//! change under the visitor's feet and Shopify is the only source of truth.

use crate::shopify::types::{CollectionSummary, HeaderData, ProductSummary};

/// Cache key for header, product, and collection queries.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Header { menu_handle: String },
    RecommendedProducts { first: i64 },
    FeaturedCollection,
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Header(Box<HeaderData>),
    RecommendedProducts(Vec<ProductSummary>),
    FeaturedCollection(Option<Box<CollectionSummary>>),
}
