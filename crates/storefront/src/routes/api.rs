//! JSON API handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Serialize;
use tracing::instrument;

use twb_core::{CartTotals, LineItem};

use crate::error::Result;
use crate::routes::home::MenuQuery;
use crate::routes::products::ProductView;
use crate::state::AppState;

/// Cart snapshot returned by `GET /api/cart`.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub lines: Vec<LineItem>,
    pub item_count: u64,
    pub totals: CartTotals,
}

/// Current cart lines and totals.
#[instrument(skip(state))]
pub async fn cart(State(state): State<AppState>) -> Result<Json<CartResponse>> {
    let response = state.with_cart(|store| {
        let cart = store.cart();
        CartResponse {
            lines: cart.lines().to_vec(),
            item_count: cart.item_count(),
            totals: cart.totals(),
        }
    })?;
    Ok(Json(response))
}

/// Filtered catalog.
#[instrument(skip(state))]
pub async fn products(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> Result<Json<Vec<ProductView>>> {
    let products = state.catalog().search(&query.filter()).await?;
    Ok(Json(products.iter().map(ProductView::from).collect()))
}
