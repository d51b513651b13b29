//! Integration tests for the storefront pages and cart endpoints.
//!
//! These tests require:
//! - A running `PostgreSQL` database with the session table
//!   (`soap-store-cli migrate`)
//! - The storefront running (`cargo run -p soap-store-storefront`)
//! - Valid Shopify Storefront API credentials in environment
//!
//! Run with: cargo test -p soap-store-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::json;
use soap_store_integration_tests::{session_client, storefront_base_url};

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_health() {
    let client = session_client().expect("Failed to create HTTP client");
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/health"))
        .send()
        .await
        .expect("Failed to call /health");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("Failed to read body"), "ok");
}

// ============================================================================
// Pages
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server and Shopify credentials"]
async fn test_home_page_renders_layout() {
    let client = session_client().expect("Failed to create HTTP client");
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/"))
        .send()
        .await
        .expect("Failed to get home page");

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("content-security-policy"));
    assert!(resp.headers().contains_key("x-request-id"));

    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("class=\"header header-desktop\""));
    assert!(body.contains("class=\"header header-mobile\""));
    assert!(body.contains("id=\"cart-aside\""));
    assert!(body.contains("class=\"hero\""));
}

#[tokio::test]
#[ignore = "Requires running storefront server and Shopify credentials"]
async fn test_cart_page_empty_for_new_session() {
    let client = session_client().expect("Failed to create HTTP client");
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/cart"))
        .send()
        .await
        .expect("Failed to get cart page");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Looks like you haven't added anything yet"));
}

// ============================================================================
// Cart fragments
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_cart_count_starts_at_zero() {
    let client = session_client().expect("Failed to create HTTP client");
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/cart/count"))
        .send()
        .await
        .expect("Failed to get cart count");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("Failed to read body").trim(), "0");
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_cart_drawer_fragment_has_no_layout() {
    let client = session_client().expect("Failed to create HTTP client");
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/cart/drawer"))
        .send()
        .await
        .expect("Failed to get cart drawer");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(!body.contains("<html"));
    assert!(body.contains("cart-main"));
}

// ============================================================================
// Cart actions
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_cart_action_rejects_malformed_input() {
    let client = session_client().expect("Failed to create HTTP client");
    let base_url = storefront_base_url();

    let resp = client
        .post(format!("{base_url}/cart"))
        .form(&[("cartFormInput", "{not json")])
        .send()
        .await
        .expect("Failed to post cart action");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_cart_action_rejects_missing_input() {
    let client = session_client().expect("Failed to create HTTP client");
    let base_url = storefront_base_url();

    let resp = client
        .post(format!("{base_url}/cart"))
        .form(&[("redirectTo", "/")])
        .send()
        .await
        .expect("Failed to post cart action");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running storefront server and Shopify credentials"]
async fn test_discount_update_without_htmx_redirects() {
    let client = session_client().expect("Failed to create HTTP client");
    let base_url = storefront_base_url();

    let input = json!({
        "action": "DiscountCodesUpdate",
        "inputs": {"discountCodes": []}
    });

    let resp = client
        .post(format!("{base_url}/cart"))
        .form(&[
            ("cartFormInput", input.to_string()),
            ("redirectTo", "//evil.example/".to_string()),
        ])
        .send()
        .await
        .expect("Failed to post cart action");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("Missing Location header");
    assert_eq!(location, "/cart");
}

#[tokio::test]
#[ignore = "Requires running storefront server and Shopify credentials"]
async fn test_discount_update_with_htmx_returns_drawer() {
    let client = session_client().expect("Failed to create HTTP client");
    let base_url = storefront_base_url();

    let input = json!({
        "action": "DiscountCodesUpdate",
        "inputs": {"discountCodes": []}
    });

    let resp = client
        .post(format!("{base_url}/cart"))
        .header("HX-Request", "true")
        .form(&[("cartFormInput", input.to_string())])
        .send()
        .await
        .expect("Failed to post cart action");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get("hx-trigger")
            .and_then(|v| v.to_str().ok()),
        Some("cart-updated")
    );
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("cart-main"));
}
