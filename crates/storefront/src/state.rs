//! Application state shared across handlers.

use std::sync::{Arc, Mutex};

use crate::config::StorefrontConfig;
use crate::error::AppError;
use crate::services::{CartStore, Catalog, PaymentSimulator};
use crate::storage::LocalStorage;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the catalog, the cart store and the payment simulator.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    cart: Mutex<CartStore>,
    payments: PaymentSimulator,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `catalog` - Product catalog
    /// * `storage` - Key-value store holding the cart slot; the cart is
    ///   restored from it immediately
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog, storage: LocalStorage) -> Self {
        let payments = PaymentSimulator::new(config.payment_delay);
        let cart = CartStore::open(storage);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart: Mutex::new(cart),
                payments,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the payment simulator.
    #[must_use]
    pub fn payments(&self) -> &PaymentSimulator {
        &self.inner.payments
    }

    /// Run `f` with exclusive access to the cart store.
    ///
    /// The lock is released before this returns, so callers must not hold
    /// anything borrowed from the store across an `.await`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if a previous holder panicked.
    pub fn with_cart<R>(&self, f: impl FnOnce(&mut CartStore) -> R) -> Result<R, AppError> {
        let mut store = self
            .inner
            .cart
            .lock()
            .map_err(|_| AppError::Internal("cart lock poisoned".to_string()))?;
        Ok(f(&mut store))
    }
}
