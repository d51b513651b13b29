//! Shopify Storefront API client implementation.
//!
//! Operations implement `graphql_client::GraphQLQuery` (see [`queries`]) and
//! are sent with `reqwest` 0.13. Header data and homepage listings are cached
//! using `moka` (5-minute TTL); carts are always fetched fresh.

mod cache;
mod conversions;

pub mod queries;

use std::sync::Arc;
use std::time::Duration;

use graphql_client::{GraphQLQuery, Response};
use moka::future::Cache;
use secrecy::ExposeSecret;
use soap_store_core::{CartId, CartLineId};
use tracing::{debug, instrument};

use crate::config::ShopifyStorefrontConfig;
use crate::shopify::ShopifyError;
use crate::shopify::types::{
    Cart, CartLineInput, CartLineUpdateInput, CollectionSummary, HeaderData, ProductSummary,
};

use cache::{CacheKey, CacheValue};
use conversions::{
    convert_cart, convert_featured_collection, convert_header, convert_recommended_products,
    convert_user_errors,
};
use queries::{
    AddToCart, CartMutationPayload, CreateCart, FeaturedCollection, GetCart, Header,
    RecommendedProducts, RemoveFromCart, UpdateCartDiscountCodes, UpdateCartLines, add_to_cart,
    create_cart, featured_collection, get_cart, header, recommended_products, remove_from_cart,
    update_cart_discount_codes, update_cart_lines,
};

/// Response cache capacity (entries).
const CACHE_CAPACITY: u64 = 1000;

/// Response cache time-to-live.
const CACHE_TTL: Duration = Duration::from_secs(300);

// =============================================================================
// StorefrontClient
// =============================================================================

/// Client for the Shopify Storefront API.
///
/// Cheap to clone; clones share the HTTP connection pool and the cache.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
    cache: Cache<CacheKey, CacheValue>,
}

impl StorefrontClient {
    /// Create a new Storefront API client.
    #[must_use]
    pub fn new(config: &ShopifyStorefrontConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(StorefrontClientInner {
                client: reqwest::Client::new(),
                endpoint: config.endpoint(),
                access_token: config.storefront_private_token.expose_secret().to_string(),
                cache,
            }),
        }
    }

    /// Execute a GraphQL operation.
    async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, ShopifyError> {
        let request_body = Q::build_query(variables);
        let operation = request_body.operation_name;

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            // Private access tokens use a different header than public tokens
            .header(
                "Shopify-Storefront-Private-Token",
                &self.inner.access_token,
            )
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ShopifyError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                operation,
                status = %status,
                body = %truncate(&response_text, 500),
                "Shopify API returned non-success status"
            );
            return Err(ShopifyError::GraphQL(vec![super::GraphQLError::message(
                format!("HTTP {status}: {}", truncate(&response_text, 200)),
            )]));
        }

        let response: Response<Q::ResponseData> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    operation,
                    error = %e,
                    body = %truncate(&response_text, 500),
                    "Failed to parse Shopify GraphQL response"
                );
                return Err(ShopifyError::Parse(e));
            }
        };

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            tracing::debug!(operation, errors = ?errors, "GraphQL errors in response");

            return Err(ShopifyError::GraphQL(
                errors
                    .into_iter()
                    .map(|e| super::GraphQLError {
                        message: e.message,
                        locations: e.locations.map_or_else(Vec::new, |locs| {
                            locs.into_iter()
                                .map(|l| super::GraphQLErrorLocation {
                                    line: i64::from(l.line),
                                    column: i64::from(l.column),
                                })
                                .collect()
                        }),
                        path: e.path.map_or_else(Vec::new, |p| {
                            p.into_iter()
                                .map(|fragment| match fragment {
                                    graphql_client::PathFragment::Key(s) => {
                                        serde_json::Value::String(s)
                                    }
                                    graphql_client::PathFragment::Index(i) => {
                                        serde_json::Value::Number(i.into())
                                    }
                                })
                                .collect()
                        }),
                    })
                    .collect(),
            ));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                operation,
                body = %truncate(&response_text, 500),
                "Shopify GraphQL response has no data and no errors"
            );
            ShopifyError::GraphQL(vec![super::GraphQLError::message("No data in response")])
        })
    }

    // =========================================================================
    // Layout Methods
    // =========================================================================

    /// Get the shop identity and the header menu.
    ///
    /// `menu` is `None` when the shop has no menu with this handle; callers
    /// fall back to a built-in menu.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_header(&self, menu_handle: &str) -> Result<HeaderData, ShopifyError> {
        let cache_key = CacheKey::Header {
            menu_handle: menu_handle.to_string(),
        };

        if let Some(CacheValue::Header(data)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for header");
            return Ok(*data);
        }

        let data = self
            .execute::<Header>(header::Variables {
                header_menu_handle: menu_handle.to_string(),
            })
            .await?;

        let header = convert_header(data);

        self.inner
            .cache
            .insert(cache_key, CacheValue::Header(Box::new(header.clone())))
            .await;

        Ok(header)
    }

    // =========================================================================
    // Homepage Methods
    // =========================================================================

    /// Get the most recently updated collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_featured_collection(&self) -> Result<Option<CollectionSummary>, ShopifyError> {
        if let Some(CacheValue::FeaturedCollection(collection)) =
            self.inner.cache.get(&CacheKey::FeaturedCollection).await
        {
            debug!("Cache hit for featured collection");
            return Ok(collection.map(|c| *c));
        }

        let data = self
            .execute::<FeaturedCollection>(featured_collection::Variables::default())
            .await?;

        let collection = convert_featured_collection(data);

        self.inner
            .cache
            .insert(
                CacheKey::FeaturedCollection,
                CacheValue::FeaturedCollection(collection.clone().map(Box::new)),
            )
            .await;

        Ok(collection)
    }

    /// Get the `first` most recently updated products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_recommended_products(
        &self,
        first: i64,
    ) -> Result<Vec<ProductSummary>, ShopifyError> {
        let cache_key = CacheKey::RecommendedProducts { first };

        if let Some(CacheValue::RecommendedProducts(products)) =
            self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for recommended products");
            return Ok(products);
        }

        let data = self
            .execute::<RecommendedProducts>(recommended_products::Variables { first })
            .await?;

        let products = convert_recommended_products(data);

        self.inner
            .cache
            .insert(cache_key, CacheValue::RecommendedProducts(products.clone()))
            .await;

        Ok(products)
    }

    // =========================================================================
    // Cart Methods (not cached - mutable state)
    // =========================================================================

    /// Get a cart by ID.
    ///
    /// Returns `Ok(None)` when Shopify no longer knows the cart (expired or
    /// completed checkout).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(cart_id = %cart_id))]
    pub async fn get_cart(&self, cart_id: &CartId) -> Result<Option<Cart>, ShopifyError> {
        let data = self
            .execute::<GetCart>(get_cart::Variables {
                cart_id: cart_id.to_string(),
            })
            .await?;

        data.cart.map(convert_cart).transpose()
    }

    /// Create a new cart with the given lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart creation fails or user errors are returned.
    #[instrument(skip(self, lines))]
    pub async fn create_cart(&self, lines: Vec<CartLineInput>) -> Result<Cart, ShopifyError> {
        let data = self
            .execute::<CreateCart>(create_cart::Variables {
                input: create_cart::CartInput { lines },
            })
            .await?;

        mutation_result(data.cart_create, "create cart")
    }

    /// Add lines to an existing cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart update fails or user errors are returned.
    #[instrument(skip(self, lines), fields(cart_id = %cart_id))]
    pub async fn add_to_cart(
        &self,
        cart_id: &CartId,
        lines: Vec<CartLineInput>,
    ) -> Result<Cart, ShopifyError> {
        let data = self
            .execute::<AddToCart>(add_to_cart::Variables {
                cart_id: cart_id.to_string(),
                lines,
            })
            .await?;

        mutation_result(data.cart_lines_add, "add to cart")
    }

    /// Update line quantities in a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart update fails or user errors are returned.
    #[instrument(skip(self, lines), fields(cart_id = %cart_id))]
    pub async fn update_cart_lines(
        &self,
        cart_id: &CartId,
        lines: Vec<CartLineUpdateInput>,
    ) -> Result<Cart, ShopifyError> {
        let data = self
            .execute::<UpdateCartLines>(update_cart_lines::Variables {
                cart_id: cart_id.to_string(),
                lines,
            })
            .await?;

        mutation_result(data.cart_lines_update, "update cart lines")
    }

    /// Remove lines from a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart update fails or user errors are returned.
    #[instrument(skip(self, line_ids), fields(cart_id = %cart_id))]
    pub async fn remove_from_cart(
        &self,
        cart_id: &CartId,
        line_ids: Vec<CartLineId>,
    ) -> Result<Cart, ShopifyError> {
        let data = self
            .execute::<RemoveFromCart>(remove_from_cart::Variables {
                cart_id: cart_id.to_string(),
                line_ids: line_ids.into_iter().map(CartLineId::into_inner).collect(),
            })
            .await?;

        mutation_result(data.cart_lines_remove, "remove from cart")
    }

    /// Replace the discount codes on a cart. An empty list removes them all.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart update fails or user errors are returned.
    #[instrument(skip(self, discount_codes), fields(cart_id = %cart_id))]
    pub async fn update_discount_codes(
        &self,
        cart_id: &CartId,
        discount_codes: Vec<String>,
    ) -> Result<Cart, ShopifyError> {
        let data = self
            .execute::<UpdateCartDiscountCodes>(update_cart_discount_codes::Variables {
                cart_id: cart_id.to_string(),
                discount_codes,
            })
            .await?;

        mutation_result(data.cart_discount_codes_update, "update discount codes")
    }
}

/// Turn a cart mutation payload into the updated cart.
///
/// User errors take precedence over a returned cart so the visitor sees why
/// their change did not apply.
fn mutation_result(
    payload: Option<CartMutationPayload>,
    action: &str,
) -> Result<Cart, ShopifyError> {
    if let Some(result) = payload {
        if !result.user_errors.is_empty() {
            return Err(ShopifyError::UserError(
                convert_user_errors(result.user_errors)
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<_>>()
                    .join("; "),
            ));
        }

        if let Some(cart) = result.cart {
            return convert_cart(cart);
        }
    }

    Err(ShopifyError::GraphQL(vec![super::GraphQLError::message(
        format!("Failed to {action}"),
    )]))
}

/// First `max` characters of `s`, for log lines.
fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use queries::CartUserErrorFields;

    fn payload(json: &str) -> CartMutationPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_mutation_result_user_errors_win() {
        let result = mutation_result(
            Some(payload(
                r#"{"cart": null, "userErrors": [
                    {"code": "INVALID", "field": ["lines"], "message": "Out of stock"},
                    {"code": null, "field": null, "message": "Try fewer"}
                ]}"#,
            )),
            "update cart lines",
        );
        match result {
            Err(ShopifyError::UserError(msg)) => assert_eq!(msg, "Out of stock; Try fewer"),
            other => panic!("expected user error, got {other:?}"),
        }
    }

    #[test]
    fn test_mutation_result_returns_cart() {
        let result = mutation_result(
            Some(payload(
                r#"{"cart": {"id": "gid://shopify/Cart/1?key=a", "checkoutUrl": "https://x", "totalQuantity": 0, "lines": {"nodes": []}}, "userErrors": []}"#,
            )),
            "remove from cart",
        )
        .unwrap();
        assert_eq!(result.id.as_str(), "gid://shopify/Cart/1?key=a");
        assert!(result.lines.is_empty());
    }

    #[test]
    fn test_mutation_result_missing_payload() {
        let err = mutation_result(None, "create cart").unwrap_err();
        assert_eq!(err.to_string(), "GraphQL errors: Failed to create cart");
    }

    #[test]
    fn test_user_error_fields_deserialize() {
        let e: CartUserErrorFields =
            serde_json::from_str(r#"{"code": "INVALID", "field": null, "message": "m"}"#).unwrap();
        assert_eq!(e.message, "m");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abcdef", 3), "abc");
        assert_eq!(truncate("ab", 3), "ab");
    }
}
