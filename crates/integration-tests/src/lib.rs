//! Integration tests for TWB.
//!
//! The storefront router is driven in-process with
//! `tower::ServiceExt::oneshot`; no server or database is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p twb-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_cart` - Cart mutations, coupons and persistence
//! - `storefront_checkout` - Payment and order history
//! - `storefront_menu` - Menu filtering, product pages and the JSON API

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use std::path::PathBuf;
use std::time::Duration;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use twb_storefront::config::{CartStorageConfig, StorefrontConfig};
use twb_storefront::services::Catalog;
use twb_storefront::state::AppState;
use twb_storefront::storage::LocalStorage;

/// Largest response body the helpers will buffer.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// A storefront wired to the sample menu with no payment delay.
pub struct TestContext {
    pub app: Router,
    pub state: AppState,
}

impl TestContext {
    /// Storefront with an in-memory cart.
    #[must_use]
    pub fn new() -> Self {
        Self::with_storage(LocalStorage::memory())
    }

    /// Storefront whose cart slot lives under `dir`.
    #[must_use]
    pub fn with_cart_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let config = StorefrontConfig {
            cart_storage: CartStorageConfig::Directory(dir.clone()),
            ..test_config()
        };
        Self::build(config, LocalStorage::directory(dir))
    }

    /// Storefront over an explicit storage backend.
    #[must_use]
    pub fn with_storage(storage: LocalStorage) -> Self {
        Self::build(test_config(), storage)
    }

    fn build(config: StorefrontConfig, storage: LocalStorage) -> Self {
        let catalog = Catalog::sample(Duration::ZERO);
        let state = AppState::new(config, catalog, storage);
        Self {
            app: twb_storefront::app(state.clone()),
            state,
        }
    }

    /// Send a GET request.
    pub async fn get(&self, uri: &str) -> Response {
        let request = Request::get(uri).body(Body::empty()).unwrap();
        self.app.clone().oneshot(request).await.unwrap()
    }

    /// Send a form POST with `application/x-www-form-urlencoded` fields.
    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> Response {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.app.clone().oneshot(request).await.unwrap()
    }

    /// Current cart as returned by `GET /api/cart`.
    pub async fn cart_json(&self) -> Value {
        let response = self.get("/api/cart").await;
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await
    }

    /// Add a sample product through the form endpoint.
    pub async fn add_to_cart(&self, product_id: i32, quantity: u32) {
        let product_id = product_id.to_string();
        let quantity = quantity.to_string();
        let response = self
            .post_form(
                "/cart/add",
                &[("product_id", product_id.as_str()), ("quantity", quantity.as_str())],
            )
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for tests: memory cart, no payment delay, no cache.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        cart_storage: CartStorageConfig::Memory,
        payment_delay: Duration::ZERO,
        catalog_cache_ttl: Duration::ZERO,
        ..StorefrontConfig::default()
    }
}

/// Scratch directory for a persisted cart slot, removed on drop.
#[must_use]
pub fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

/// Read a response body as UTF-8 text.
pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), MAX_BODY_BYTES).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), MAX_BODY_BYTES).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Redirect target of a response.
#[must_use]
pub fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}
