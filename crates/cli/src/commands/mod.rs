//! CLI subcommand implementations.

pub mod catalog;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

use twb_storefront::config::{ConfigError, StorefrontConfig};
use twb_storefront::db;

/// Errors shared by commands that need the catalog database.
#[derive(Debug, Error)]
pub enum DatabaseSetupError {
    #[error("Missing environment variable: STOREFRONT_DATABASE_URL (or DATABASE_URL)")]
    MissingDatabaseUrl,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Resolve the catalog database URL the same way the storefront does.
pub fn database_url() -> Result<SecretString, DatabaseSetupError> {
    StorefrontConfig::from_env()?
        .database_url
        .ok_or(DatabaseSetupError::MissingDatabaseUrl)
}

/// Connect to the catalog database.
pub async fn connect() -> Result<PgPool, DatabaseSetupError> {
    let url = database_url()?;
    tracing::info!("Connecting to storefront database...");
    Ok(db::create_pool(&url).await?)
}
