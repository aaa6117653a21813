//! Catalog inspection commands.

use tracing::info;

use twb_core::format_amount;
use twb_storefront::db::ProductRepository;

/// Log every available product in the catalog database.
///
/// # Errors
///
/// Returns an error if the database URL is missing or the query fails.
pub async fn list() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    let products = ProductRepository::new(&pool).list_available().await?;

    for product in &products {
        info!(
            id = %product.id,
            name = %product.display_name(),
            price = %format_amount(product.price),
            category = product.category.map_or("-", |c| c.as_str()),
            "Product"
        );
    }
    info!(count = products.len(), "Available products");
    Ok(())
}
