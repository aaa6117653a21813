//! Product repository.
//!
//! Queries use the runtime `query_as` API so the crate builds without a live
//! database or offline query cache.

use rust_decimal::Decimal;
use sqlx::PgPool;

use twb_core::{Product, ProductCategory, ProductId};

use super::RepositoryError;

/// Raw `storefront.product` row.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    name_zh: Option<String>,
    description: String,
    price: Decimal,
    image: String,
    category: Option<String>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        if row.price.is_sign_negative() && !row.price.is_zero() {
            return Err(RepositoryError::DataCorruption(format!(
                "product {} has negative price {}",
                row.id, row.price
            )));
        }

        let category = match row.category.as_deref() {
            None => None,
            Some(raw) => match raw.parse::<ProductCategory>() {
                Ok(category) => Some(category),
                Err(e) => {
                    tracing::warn!(product_id = row.id, error = %e, "Ignoring unknown product category");
                    None
                }
            },
        };

        Ok(Self {
            id: ProductId::new(row.id),
            name: row.name,
            name_zh: row.name_zh,
            description: row.description,
            price: row.price,
            image: row.image,
            category,
        })
    }
}

/// Repository for catalog reads and seeding.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All products currently offered, in id order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row has a negative price.
    pub async fn list_available(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, name_zh, description, price, image, category
            FROM storefront.product
            WHERE is_available = true
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    /// Insert or update a product, marking it available.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn upsert(&self, product: &Product) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO storefront.product
                (id, name, name_zh, description, price, image, category, is_available)
            VALUES ($1, $2, $3, $4, $5, $6, $7, true)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                name_zh = EXCLUDED.name_zh,
                description = EXCLUDED.description,
                price = EXCLUDED.price,
                image = EXCLUDED.image,
                category = EXCLUDED.category,
                is_available = true,
                updated_at = NOW()
            ",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.name_zh)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.image)
        .bind(product.category.map(|c| c.as_str()))
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Delete every product. Returns the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn delete_all(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM storefront.product")
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn row(category: Option<&str>, price: Decimal) -> ProductRow {
        ProductRow {
            id: 1,
            name: "Soy Milk".to_owned(),
            name_zh: Some("豆漿".to_owned()),
            description: "Freshly made".to_owned(),
            price,
            image: "/img/soy.jpg".to_owned(),
            category: category.map(str::to_owned),
        }
    }

    #[test]
    fn test_row_conversion() {
        let product = Product::try_from(row(Some("DRINK"), Decimal::new(250, 2))).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.category, Some(ProductCategory::Drink));
        assert_eq!(product.display_name(), "豆漿");
    }

    #[test]
    fn test_unknown_category_is_dropped() {
        let product = Product::try_from(row(Some("DESSERT"), Decimal::ONE)).unwrap();
        assert_eq!(product.category, None);
    }

    #[test]
    fn test_negative_price_is_corruption() {
        let err = Product::try_from(row(None, Decimal::new(-1, 0))).unwrap_err();
        assert!(matches!(err, RepositoryError::DataCorruption(_)));
    }
}
