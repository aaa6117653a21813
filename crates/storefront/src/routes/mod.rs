//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Menu (?q= search, ?category= tab)
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products/{id}          - Product detail
//!
//! # Cart (form posts, 303 back)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart
//! POST /cart/adjust            - Increment/decrement quantity
//! POST /cart/update            - Set quantity
//! POST /cart/remove            - Remove item
//! POST /cart/clear             - Empty the cart
//! POST /cart/coupon            - Apply coupon (422 + message when unknown)
//! GET  /cart/count             - Cart count badge
//!
//! # Checkout
//! GET  /payment                - Checkout page
//! POST /payment                - Simulated payment, then receipt
//!
//! # Orders
//! GET  /orders                 - Order history
//!
//! # JSON
//! GET  /api/cart               - Cart lines and totals
//! GET  /api/products           - Filtered catalog
//! ```

pub mod api;
pub mod cart;
pub mod home;
pub mod orders;
pub mod payment;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new().route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/adjust", post(cart::adjust))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/coupon", post(cart::coupon))
        .route("/count", get(cart::count))
}

/// Create the JSON API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(api::cart))
        .route("/products", get(api::products))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Menu
        .route("/", get(home::home))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        // Checkout
        .route("/payment", get(payment::show).post(payment::submit))
        .route("/orders", get(orders::index))
        .nest("/api", api_routes())
}
