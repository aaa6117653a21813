//! Storefront services.
//!
//! - [`cart`] - Cart store with write-through local persistence
//! - [`catalog`] - Cached product catalog (database or sample menu)
//! - [`payment`] - Simulated payment processing

pub mod cart;
pub mod catalog;
pub mod payment;

pub use cart::{CART_STORAGE_KEY, CartStore};
pub use catalog::{Catalog, CatalogSource, sample_products};
pub use payment::{PaymentReceipt, PaymentSimulator};
