//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string for the catalog,
//!   falling back to `DATABASE_URL`. Without either the sample menu is served.
//! - `STOREFRONT_CART_DIR` - Directory for the local cart slot (default: `.twb`).
//!   The literal `memory` keeps the cart in memory only.
//! - `STOREFRONT_PAYMENT_DELAY_MS` - Simulated payment delay (default: 2000)
//! - `STOREFRONT_CATALOG_CACHE_SECS` - Catalog cache TTL, 0 disables (default: 60)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance trace sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

use crate::storage::LocalStorage;

/// Value of `STOREFRONT_CART_DIR` that selects in-memory cart storage.
pub const MEMORY_CART_STORAGE: &str = "memory";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where the cart slot lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartStorageConfig {
    Directory(PathBuf),
    Memory,
}

impl CartStorageConfig {
    /// Open the configured backend.
    #[must_use]
    pub fn open(&self) -> LocalStorage {
        match self {
            Self::Directory(dir) => LocalStorage::directory(dir),
            Self::Memory => LocalStorage::memory(),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Catalog database connection URL (contains password)
    pub database_url: Option<SecretString>,
    /// Cart persistence backend
    pub cart_storage: CartStorageConfig,
    /// How long the simulated payment takes
    pub payment_delay: Duration,
    /// Catalog cache time-to-live
    pub catalog_cache_ttl: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production", "staging")
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            database_url: None,
            cart_storage: CartStorageConfig::Directory(PathBuf::from(".twb")),
            payment_delay: Duration::from_millis(2000),
            catalog_cache_ttl: Duration::from_secs(60),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = parse_or(&lookup, "STOREFRONT_HOST", defaults.host)?;
        let port = parse_or(&lookup, "STOREFRONT_PORT", defaults.port)?;

        let database_url = lookup("STOREFRONT_DATABASE_URL")
            .or_else(|| lookup("DATABASE_URL"))
            .filter(|url| !url.is_empty())
            .map(SecretString::from);

        let cart_storage = match lookup("STOREFRONT_CART_DIR") {
            Some(dir) if dir == MEMORY_CART_STORAGE => CartStorageConfig::Memory,
            Some(dir) if !dir.is_empty() => CartStorageConfig::Directory(PathBuf::from(dir)),
            _ => defaults.cart_storage,
        };

        let payment_delay = Duration::from_millis(parse_or(
            &lookup,
            "STOREFRONT_PAYMENT_DELAY_MS",
            2000_u64,
        )?);
        let catalog_cache_ttl = Duration::from_secs(parse_or(
            &lookup,
            "STOREFRONT_CATALOG_CACHE_SECS",
            60_u64,
        )?);

        let sentry_sample_rate = parse_rate(&lookup, "SENTRY_SAMPLE_RATE", 1.0)?;
        let sentry_traces_sample_rate = parse_rate(&lookup, "SENTRY_TRACES_SAMPLE_RATE", 0.0)?;

        Ok(Self {
            host,
            port,
            database_url,
            cart_storage,
            payment_delay,
            catalog_cache_ttl,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable, using `default` when it is unset.
fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Parse a sample rate in `0.0..=1.0`.
fn parse_rate(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: f32,
) -> Result<f32, ConfigError> {
    let rate = parse_or(lookup, key, default)?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert!(config.database_url.is_none());
        assert_eq!(
            config.cart_storage,
            CartStorageConfig::Directory(PathBuf::from(".twb"))
        );
        assert_eq!(config.payment_delay, Duration::from_secs(2));
        assert_eq!(config.catalog_cache_ttl, Duration::from_secs(60));
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("STOREFRONT_HOST", "0.0.0.0"),
            ("STOREFRONT_PORT", "8080"),
            ("STOREFRONT_CART_DIR", "memory"),
            ("STOREFRONT_PAYMENT_DELAY_MS", "0"),
            ("STOREFRONT_CATALOG_CACHE_SECS", "5"),
            ("SENTRY_TRACES_SAMPLE_RATE", "0.25"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.cart_storage, CartStorageConfig::Memory);
        assert_eq!(config.payment_delay, Duration::ZERO);
        assert_eq!(config.catalog_cache_ttl, Duration::from_secs(5));
        assert!((config.sentry_traces_sample_rate - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_database_url_fallback() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/twb")]).unwrap();
        assert_eq!(
            config.database_url.unwrap().expose_secret(),
            "postgres://localhost/twb"
        );

        let config = load(&[
            ("STOREFRONT_DATABASE_URL", "postgres://primary/twb"),
            ("DATABASE_URL", "postgres://fallback/twb"),
        ])
        .unwrap();
        assert_eq!(
            config.database_url.unwrap().expose_secret(),
            "postgres://primary/twb"
        );
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("STOREFRONT_PORT", "not-a-port")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "STOREFRONT_PORT"));
    }

    #[test]
    fn test_sample_rate_out_of_range() {
        assert!(load(&[("SENTRY_SAMPLE_RATE", "1.5")]).is_err());
    }

    #[test]
    fn test_database_url_not_in_debug_output() {
        let config = load(&[("STOREFRONT_DATABASE_URL", "postgres://user:hunter2@db/twb")]).unwrap();
        let debug_output = format!("{config:?}");
        assert!(!debug_output.contains("hunter2"));
    }
}
