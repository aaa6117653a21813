//! Catalog products and menu filtering.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::LineItem;
use crate::types::{ProductCategory, ProductId};

/// A product offered on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Localized (Traditional Chinese) name, shown in preference to `name`.
    pub name_zh: Option<String>,
    pub description: String,
    pub price: Decimal,
    pub image: String,
    pub category: Option<ProductCategory>,
}

impl Product {
    /// Name shown to customers.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name_zh.as_deref().unwrap_or(&self.name)
    }

    /// Build a cart line for this product at its current price.
    #[must_use]
    pub fn to_line_item(&self, quantity: u32, note: Option<String>) -> LineItem {
        LineItem::new(self.id, self.display_name(), self.price, quantity).with_note(note)
    }
}

/// Menu search and category filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub search: String,
    /// `None` means all categories.
    pub category: Option<ProductCategory>,
}

impl ProductFilter {
    /// Build a filter from raw query values.
    ///
    /// `ALL`, an empty string, or an unknown category all mean "every
    /// category".
    #[must_use]
    pub fn from_query(search: Option<&str>, category: Option<&str>) -> Self {
        Self {
            search: search.unwrap_or_default().to_owned(),
            category: category.and_then(|c| c.parse().ok()),
        }
    }

    /// Whether a product passes the filter.
    ///
    /// The localized name is matched case-sensitively; name and description
    /// case-insensitively.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_search(product) && self.matches_category(product)
    }

    fn matches_search(&self, product: &Product) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        product
            .name_zh
            .as_deref()
            .is_some_and(|zh| zh.contains(&self.search))
            || product.name.to_lowercase().contains(&needle)
            || product.description.to_lowercase().contains(&needle)
    }

    fn matches_category(&self, product: &Product) -> bool {
        self.category
            .is_none_or(|wanted| product.category == Some(wanted))
    }

    /// Products passing the filter, in catalog order.
    #[must_use]
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect()
    }
}
