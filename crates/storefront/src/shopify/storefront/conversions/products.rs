//! Homepage product and collection conversion functions.

use soap_store_core::{MerchandiseId, ProductId};
use tracing::warn;

use crate::shopify::types::{
    CollectionSummary, PriceRange, ProductSummary, VariantSummary,
};

use super::super::queries::{featured_collection, recommended_products};
use super::{convert_image, convert_money};

/// Convert the `RecommendedProducts` response, preserving Shopify's order.
///
/// Products with malformed IDs are skipped with a warning.
pub fn convert_recommended_products(data: recommended_products::ResponseData) -> Vec<ProductSummary> {
    data.products
        .nodes
        .into_iter()
        .filter_map(convert_product)
        .collect()
}

fn convert_product(product: recommended_products::ProductFields) -> Option<ProductSummary> {
    let id = match ProductId::parse(&product.id) {
        Ok(id) => id,
        Err(e) => {
            warn!(product_id = %product.id, "Skipping product: {e}");
            return None;
        }
    };

    // A variant with a bad ID only loses its quick-add form
    let first_variant = product.variants.nodes.into_iter().next().and_then(|v| {
        MerchandiseId::parse(&v.id)
            .map(|id| VariantSummary {
                id,
                available_for_sale: v.available_for_sale,
            })
            .map_err(|e| warn!(variant_id = %v.id, "Ignoring variant: {e}"))
            .ok()
    });

    Some(ProductSummary {
        id,
        title: product.title,
        handle: product.handle,
        price_range: PriceRange {
            min_variant_price: convert_money(product.price_range.min_variant_price),
        },
        image: product.images.nodes.into_iter().next().map(convert_image),
        first_variant,
    })
}

/// Convert the `FeaturedCollection` response to its first collection, if any.
pub fn convert_featured_collection(
    data: featured_collection::ResponseData,
) -> Option<CollectionSummary> {
    data.collections
        .nodes
        .into_iter()
        .next()
        .map(|c| CollectionSummary {
            id: c.id,
            title: c.title,
            handle: c.handle,
            image: c.image.map(convert_image),
        })
}
