//! Domain models for storefront pages.

pub mod order;

pub use order::{Order, OrderLine, sample_order_history};
