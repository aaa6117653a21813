//! Seed the catalog table with the sample breakfast menu.
//!
//! Rows are upserted by id, so seeding twice is harmless. With `--clear` every
//! existing product row is deleted first.

use tracing::info;

use twb_storefront::db::ProductRepository;
use twb_storefront::services::sample_products;

/// Seed the sample menu.
///
/// # Arguments
///
/// * `clear_existing` - If true, delete all products before inserting
///
/// # Errors
///
/// Returns an error if the database URL is missing or any query fails.
pub async fn products(clear_existing: bool) -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    let repo = ProductRepository::new(&pool);

    if clear_existing {
        let removed = repo.delete_all().await?;
        info!(removed, "Cleared existing products");
    }

    let products = sample_products();
    for product in &products {
        repo.upsert(product).await?;
        info!(id = %product.id, name = %product.name, "Seeded product");
    }

    info!(count = products.len(), "Seeding complete");
    Ok(())
}
