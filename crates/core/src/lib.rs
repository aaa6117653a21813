//! TWB Core - Shared domain library for the breakfast storefront.
//!
//! This crate provides the types and pure logic used by the other crates:
//! - `storefront` - Customer-facing ordering site
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP. Cart arithmetic lives here so it can be tested
//! without any infrastructure.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, money formatting and status enums
//! - [`catalog`] - Products and menu filtering
//! - [`cart`] - Line items, carts and derived totals
//! - [`coupon`] - Coupon codes and discounts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod coupon;
pub mod types;

pub use cart::{Cart, CartError, CartTotals, DELIVERY_FEE, LineItem, TAX_RATE};
pub use catalog::{Product, ProductFilter};
pub use coupon::{Coupon, CouponError, Discount};
pub use types::*;
