//! Shopify connectivity check.
//!
//! Runs the header query against the Storefront API with the configured
//! credentials and reports what came back.
//!
//! # Usage
//!
//! ```bash
//! soap-store-cli check
//! ```

use thiserror::Error;

use soap_store_storefront::config::{ConfigError, ShopifyStorefrontConfig};
use soap_store_storefront::shopify::{ShopifyError, StorefrontClient};

#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Shopify error: {0}")]
    Shopify(#[from] ShopifyError),
}

/// Fetch the shop name and header menu.
///
/// # Errors
///
/// Returns an error if configuration is missing or the Storefront API
/// rejects the request.
pub async fn shopify() -> Result<(), CheckError> {
    let config = ShopifyStorefrontConfig::from_env()?;
    tracing::info!(endpoint = %config.endpoint(), "Querying Storefront API...");

    let client = StorefrontClient::new(&config);
    let header = client.get_header(&config.header_menu_handle).await?;

    match header.menu {
        Some(menu) => tracing::info!(
            shop = %header.shop.name,
            menu = %config.header_menu_handle,
            items = menu.items.len(),
            "Storefront API reachable"
        ),
        None => tracing::warn!(
            shop = %header.shop.name,
            menu = %config.header_menu_handle,
            "Storefront API reachable, but the menu does not exist (fallback menu will be used)"
        ),
    }

    Ok(())
}
