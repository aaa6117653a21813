//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use serde::Serialize;
use tracing::instrument;

use twb_core::{Product, ProductId, format_amount};

use crate::error::{AppError, Result};
use crate::routes::cart::cart_count;
use crate::state::AppState;

/// Product display data for templates and the JSON API.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub name_zh: Option<String>,
    pub description: String,
    pub price: String,
    pub image: String,
    pub category: Option<String>,
    pub category_label: Option<String>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            name_zh: product.name_zh.clone(),
            description: product.description.clone(),
            price: format_amount(product.price),
            image: product.image.clone(),
            category: product.category.map(|c| c.as_str().to_string()),
            category_label: product.category.map(|c| c.label().to_string()),
        }
    }
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductView,
    pub cart_count: u64,
}

/// Display product detail page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ProductShowTemplate> {
    let product_id = ProductId::new(id);
    let product = state
        .catalog()
        .find(product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    Ok(ProductShowTemplate {
        product: ProductView::from(&product),
        cart_count: cart_count(&state)?,
    })
}
