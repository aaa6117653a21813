//! Cart store: the in-memory cart plus its persisted slot.
//!
//! The in-memory [`Cart`] is the source of truth for the running process.
//! Every mutation writes the full line array back to the `cart` slot of the
//! local key-value store; write failures are logged and otherwise ignored.
//! On startup the slot is read once, and anything missing or malformed
//! yields an empty cart.

use tracing::{debug, warn};

use twb_core::{Cart, CartTotals, CouponError, Discount, LineItem, ProductId};

use crate::storage::LocalStorage;

/// Key of the persisted cart slot.
pub const CART_STORAGE_KEY: &str = "cart";

/// Cart with write-through persistence.
#[derive(Debug)]
pub struct CartStore {
    cart: Cart,
    storage: LocalStorage,
}

impl CartStore {
    /// Open the store, restoring any previously persisted cart.
    #[must_use]
    pub fn open(storage: LocalStorage) -> Self {
        let cart = restore(&storage);
        debug!(
            backend = %storage.describe(),
            lines = cart.len(),
            "Cart restored"
        );
        Self { cart, storage }
    }

    /// Current cart contents.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The underlying key-value store.
    #[must_use]
    pub const fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    /// Add an item, merging with an existing line for the same product.
    pub fn add(&mut self, item: LineItem) {
        self.cart.add(item);
        self.persist();
    }

    /// Set a line's quantity (minimum 1). No-op if the product is absent.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if !self.cart.set_quantity(product_id, quantity) {
            debug!(%product_id, "set_quantity on product not in cart");
        }
        self.persist();
    }

    /// Increment or decrement a line's quantity (minimum 1).
    pub fn adjust_quantity(&mut self, product_id: ProductId, delta: i64) {
        if !self.cart.adjust_quantity(product_id, delta) {
            debug!(%product_id, "adjust_quantity on product not in cart");
        }
        self.persist();
    }

    /// Remove a product's line. No-op if absent.
    pub fn remove(&mut self, product_id: ProductId) {
        if !self.cart.remove(product_id) {
            debug!(%product_id, "remove on product not in cart");
        }
        self.persist();
    }

    /// Empty the cart and the persisted slot.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    /// Apply a coupon code to the in-memory cart.
    ///
    /// The discount is not part of the persisted slot.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::Invalid` for unrecognized codes; the discount
    /// is unchanged.
    pub fn apply_coupon(&mut self, code: &str) -> Result<Discount, CouponError> {
        self.cart.apply_coupon(code)
    }

    /// Derived totals for the current contents.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    /// Write the full line array to the slot, logging any failure.
    fn persist(&self) {
        let json = match serde_json::to_string(self.cart.lines()) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to serialize cart");
                return;
            }
        };
        if let Err(e) = self.storage.set(CART_STORAGE_KEY, &json) {
            warn!(error = %e, "Failed to save cart to local storage");
        }
    }
}

/// Read the persisted cart, falling back to empty on any problem.
fn restore(storage: &LocalStorage) -> Cart {
    let raw = match storage.get(CART_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Cart::new(),
        Err(e) => {
            warn!(error = %e, "Failed to read cart from local storage");
            return Cart::new();
        }
    };

    let lines: Vec<LineItem> = match serde_json::from_str(&raw) {
        Ok(lines) => lines,
        Err(e) => {
            warn!(error = %e, "Discarding malformed persisted cart");
            return Cart::new();
        }
    };

    Cart::from_lines(lines).unwrap_or_else(|e| {
        warn!(error = %e, "Discarding invalid persisted cart");
        Cart::new()
    })
}
