//! Home page route handler.
//!
//! The home page is the breakfast menu: a search box, category tabs and one
//! card per available product, each with an add-to-cart form.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::{debug, instrument};

use twb_core::{ProductCategory, ProductFilter};

use crate::error::Result;
use crate::routes::cart::cart_count;
use crate::routes::products::ProductView;
use crate::state::AppState;

/// Value of the "everything" category tab.
pub const ALL_CATEGORIES: &str = "ALL";

/// Menu query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct MenuQuery {
    pub q: Option<String>,
    pub category: Option<String>,
}

impl MenuQuery {
    /// Build the catalog filter for this query.
    #[must_use]
    pub fn filter(&self) -> ProductFilter {
        ProductFilter::from_query(self.q.as_deref(), self.category.as_deref())
    }
}

/// One category tab.
#[derive(Debug, Clone)]
pub struct CategoryTab {
    pub value: &'static str,
    pub label: &'static str,
    pub active: bool,
}

fn category_tabs(selected: Option<ProductCategory>) -> Vec<CategoryTab> {
    let mut tabs = vec![CategoryTab {
        value: ALL_CATEGORIES,
        label: "All",
        active: selected.is_none(),
    }];
    tabs.extend(ProductCategory::ALL.iter().map(|category| CategoryTab {
        value: category.as_str(),
        label: category.label(),
        active: selected == Some(*category),
    }));
    tabs
}

/// Menu page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct MenuTemplate {
    pub products: Vec<ProductView>,
    pub search: String,
    pub tabs: Vec<CategoryTab>,
    pub cart_count: u64,
}

/// Display the menu.
#[instrument(skip(state))]
pub async fn home(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> Result<MenuTemplate> {
    let filter = query.filter();
    let products = state.catalog().search(&filter).await?;
    debug!(count = products.len(), "Menu products");

    Ok(MenuTemplate {
        products: products.iter().map(ProductView::from).collect(),
        tabs: category_tabs(filter.category),
        search: filter.search,
        cart_count: cart_count(&state)?,
    })
}
