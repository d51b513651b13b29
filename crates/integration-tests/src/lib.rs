//! Integration tests for the Soap Store storefront.
//!
//! The tests talk to a running storefront over HTTP and are `#[ignore]`d by
//! default.
//!
//! # Running Tests
//!
//! ```bash
//! # Create the session table and start the server
//! cargo run -p soap-store-cli -- migrate
//! cargo run -p soap-store-storefront
//!
//! # Run integration tests
//! cargo test -p soap-store-integration-tests -- --ignored
//! ```
//!
//! Set `STOREFRONT_BASE_URL` to target a server other than
//! `http://localhost:3000`.

use reqwest::Client;
use reqwest::redirect::Policy;

/// Base URL for the storefront under test.
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Build a client that keeps the session cookie and does not follow
/// redirects, so tests can assert on `303 See Other` responses.
///
/// # Errors
///
/// Returns an error if the TLS backend fails to initialize.
pub fn session_client() -> reqwest::Result<Client> {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
}
