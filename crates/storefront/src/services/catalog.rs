//! Product catalog.
//!
//! The menu comes from one of two sources: the `storefront.product` table,
//! or the built-in sample menu when no database is configured. Either way the
//! storefront performs a single read of available products and caches it.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, instrument};

use twb_core::{Product, ProductCategory, ProductFilter, ProductId};

use crate::db::{ProductRepository, RepositoryError};

/// Where catalog reads go.
#[derive(Debug, Clone)]
pub enum CatalogSource {
    /// `PostgreSQL` `storefront.product` table.
    Database(PgPool),
    /// Built-in sample menu.
    Sample,
}

/// Cached catalog reader.
#[derive(Clone)]
pub struct Catalog {
    source: CatalogSource,
    cache: Option<Cache<(), Arc<[Product]>>>,
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("source", &self.source)
            .field("cached", &self.cache.is_some())
            .finish()
    }
}

impl Catalog {
    /// Create a catalog. A zero `cache_ttl` disables caching.
    #[must_use]
    pub fn new(source: CatalogSource, cache_ttl: Duration) -> Self {
        let cache = (!cache_ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(1)
                .time_to_live(cache_ttl)
                .build()
        });
        Self { source, cache }
    }

    /// Catalog over the sample menu.
    #[must_use]
    pub fn sample(cache_ttl: Duration) -> Self {
        Self::new(CatalogSource::Sample, cache_ttl)
    }

    /// Every available product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the database read fails.
    #[instrument(skip(self))]
    pub async fn available_products(&self) -> Result<Arc<[Product]>, RepositoryError> {
        if let Some(cache) = &self.cache
            && let Some(hit) = cache.get(&()).await
        {
            return Ok(hit);
        }

        let products: Arc<[Product]> = match &self.source {
            CatalogSource::Database(pool) => {
                ProductRepository::new(pool).list_available().await?.into()
            }
            CatalogSource::Sample => sample_products().into(),
        };
        debug!(count = products.len(), "Catalog loaded");

        if let Some(cache) = &self.cache {
            cache.insert((), Arc::clone(&products)).await;
        }
        Ok(products)
    }

    /// Look up one available product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the database read fails.
    pub async fn find(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let products = self.available_products().await?;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    /// Available products passing `filter`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the database read fails.
    pub async fn search(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let products = self.available_products().await?;
        Ok(filter.apply(&products))
    }
}

/// The built-in breakfast menu.
#[must_use]
pub fn sample_products() -> Vec<Product> {
    vec![
        sample(
            1,
            "Soy Milk",
            "豆漿",
            "Freshly made soy milk, served hot or cold.",
            Decimal::new(250, 2),
            "https://images.unsplash.com/photo-1496181133206-80ce9b88a853?w=400&h=300&fit=crop",
            ProductCategory::Drink,
        ),
        sample(
            2,
            "Pot-Cooked Noodles",
            "鍋燒意麵",
            "Fried noodles simmered in a savory broth.",
            Decimal::new(400, 2),
            "/static/menu/noodle.jpg",
            ProductCategory::Main,
        ),
        sample(
            3,
            "Fan Tuan",
            "飯糰",
            "Sticky rice roll with savory fillings.",
            Decimal::new(550, 2),
            "https://images.unsplash.com/photo-1512621776951-a57141f2eefd?w=400&h=300&fit=crop",
            ProductCategory::Main,
        ),
        sample(
            4,
            "Iced Coffee",
            "冰咖啡",
            "Cold brew coffee with ice and milk.",
            Decimal::new(350, 2),
            "/static/menu/noodle.jpg",
            ProductCategory::Drink,
        ),
        sample(
            5,
            "Taro Milk Tea",
            "芋頭鮮奶茶",
            "Smooth taro flavor with creamy milk.",
            Decimal::new(450, 2),
            "/static/menu/noodle.jpg",
            ProductCategory::Drink,
        ),
        sample(
            6,
            "Fresh Orange Juice",
            "鮮榨柳橙汁",
            "Freshly squeezed orange juice.",
            Decimal::new(300, 2),
            "https://images.unsplash.com/photo-1600271886742-f049cd451bba?w=400&h=300&fit=crop",
            ProductCategory::Drink,
        ),
    ]
}

fn sample(
    id: i32,
    name: &str,
    name_zh: &str,
    description: &str,
    price: Decimal,
    image: &str,
    category: ProductCategory,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        name_zh: Some(name_zh.to_owned()),
        description: description.to_owned(),
        price,
        image: image.to_owned(),
        category: Some(category),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_ids_are_unique() {
        let mut ids: Vec<i32> = sample_products().iter().map(|p| p.id.as_i32()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), sample_products().len());
    }

    #[test]
    fn test_sample_prices_non_negative() {
        assert!(sample_products().iter().all(|p| p.price >= Decimal::ZERO));
    }

    #[tokio::test]
    async fn test_find_and_search() {
        let catalog = Catalog::sample(Duration::from_secs(60));

        let soy = catalog.find(ProductId::new(1)).await.unwrap().unwrap();
        assert_eq!(soy.display_name(), "豆漿");
        assert!(catalog.find(ProductId::new(404)).await.unwrap().is_none());

        let drinks = catalog
            .search(&ProductFilter::from_query(None, Some("DRINK")))
            .await
            .unwrap();
        assert_eq!(drinks.len(), 4);

        let juice = catalog
            .search(&ProductFilter::from_query(Some("orange"), None))
            .await
            .unwrap();
        assert_eq!(juice.len(), 1);
        assert_eq!(juice[0].id, ProductId::new(6));
    }

    #[tokio::test]
    async fn test_cache_returns_same_snapshot() {
        let catalog = Catalog::sample(Duration::from_secs(60));
        let first = catalog.available_products().await.unwrap();
        let second = catalog.available_products().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_zero_ttl_disables_cache() {
        let catalog = Catalog::sample(Duration::ZERO);
        let first = catalog.available_products().await.unwrap();
        let second = catalog.available_products().await.unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }
}
