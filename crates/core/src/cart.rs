//! Cart line items and derived totals.
//!
//! A [`Cart`] is an ordered list of [`LineItem`]s with at most one line per
//! product, plus the discount currently applied. All arithmetic is exact
//! decimal arithmetic; rounding happens only when values are formatted.
//!
//! The serialized shape of a line item matches the persisted slot format:
//!
//! ```json
//! {"id": 1, "name": "豆漿", "price": "2.50", "quantity": 2, "notes": "less sugar"}
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coupon::{Coupon, CouponError, Discount};
use crate::types::ProductId;

/// Sales tax applied to the subtotal (10%).
pub const TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Flat delivery fee added to every order.
pub const DELIVERY_FEE: Decimal = Decimal::from_parts(200, 0, 0, false, 2);

/// Errors raised when rebuilding a cart from untrusted lines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("line for product {0} has zero quantity")]
    ZeroQuantity(ProductId),
    #[error("line for product {0} has a negative price")]
    NegativePrice(ProductId),
}

/// One product entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "id")]
    pub product_id: ProductId,
    pub name: String,
    #[serde(rename = "price")]
    pub unit_price: Decimal,
    pub quantity: u32,
    #[serde(rename = "notes", default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl LineItem {
    /// Create a line item. A zero quantity is raised to 1.
    #[must_use]
    pub fn new(
        product_id: ProductId,
        name: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
    ) -> Self {
        Self {
            product_id,
            name: name.into(),
            unit_price,
            quantity: quantity.max(1),
            note: None,
        }
    }

    /// Attach a note. Blank notes are dropped.
    #[must_use]
    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.note = normalize_note(note);
        self
    }

    /// `unit_price × quantity`, unrounded.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

fn normalize_note(note: Option<String>) -> Option<String> {
    note.map(|n| n.trim().to_owned()).filter(|n| !n.is_empty())
}

/// Totals derived from the cart contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub delivery_fee: Decimal,
    pub discount_percent: u8,
    pub discount_amount: Decimal,
    pub total: Decimal,
}

impl CartTotals {
    /// Compute totals for a set of lines and a discount.
    ///
    /// The result does not depend on line order.
    #[must_use]
    pub fn compute(lines: &[LineItem], discount: Discount) -> Self {
        let subtotal: Decimal = lines.iter().map(LineItem::line_total).sum();
        let tax = subtotal * TAX_RATE;
        let discount_amount = discount.amount_off(subtotal);

        Self {
            subtotal,
            tax,
            delivery_fee: DELIVERY_FEE,
            discount_percent: discount.percent(),
            discount_amount,
            total: subtotal + tax + DELIVERY_FEE - discount_amount,
        }
    }
}

/// Ordered collection of line items keyed by product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<LineItem>,
    discount: Discount,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from previously stored lines.
    ///
    /// Lines sharing a product id are merged in order, exactly as repeated
    /// [`Cart::add`] calls would. Blank notes are dropped.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if any line has a zero quantity or negative price.
    pub fn from_lines(lines: Vec<LineItem>) -> Result<Self, CartError> {
        let mut cart = Self::new();
        for line in lines {
            if line.quantity == 0 {
                return Err(CartError::ZeroQuantity(line.product_id));
            }
            if line.unit_price.is_sign_negative() && !line.unit_price.is_zero() {
                return Err(CartError::NegativePrice(line.product_id));
            }
            let note = normalize_note(line.note);
            cart.add(LineItem { note, ..line });
        }
        Ok(cart)
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Look up the line for a product.
    #[must_use]
    pub fn get(&self, product_id: ProductId) -> Option<&LineItem> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    fn get_mut(&mut self, product_id: ProductId) -> Option<&mut LineItem> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
    }

    /// Add an item, merging quantities with an existing line for the same
    /// product. The existing line keeps its name, price and note.
    pub fn add(&mut self, item: LineItem) {
        let quantity = item.quantity.max(1);
        match self.get_mut(item.product_id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(quantity);
            }
            None => self.lines.push(LineItem { quantity, ..item }),
        }
    }

    /// Set a line's quantity, clamped to at least 1.
    ///
    /// Returns `false` if the product is not in the cart.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) -> bool {
        self.get_mut(product_id).is_some_and(|line| {
            line.quantity = quantity.max(1);
            true
        })
    }

    /// Change a line's quantity by `delta`, never going below 1.
    ///
    /// Returns `false` if the product is not in the cart.
    pub fn adjust_quantity(&mut self, product_id: ProductId, delta: i64) -> bool {
        self.get_mut(product_id).is_some_and(|line| {
            let next = i64::from(line.quantity).saturating_add(delta).max(1);
            line.quantity = u32::try_from(next).unwrap_or(u32::MAX);
            true
        })
    }

    /// Remove a product's line.
    ///
    /// Returns `false` if the product is not in the cart.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id != product_id);
        self.lines.len() != before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The discount currently applied.
    #[must_use]
    pub const fn discount(&self) -> Discount {
        self.discount
    }

    /// Apply a coupon code.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::Invalid` for anything but the reserved codes;
    /// the current discount is left unchanged.
    pub fn apply_coupon(&mut self, code: &str) -> Result<Discount, CouponError> {
        let coupon = Coupon::parse(code)?;
        self.discount = Discount::from(coupon);
        Ok(self.discount)
    }

    /// Derived totals for the current contents.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        CartTotals::compute(&self.lines, self.discount)
    }
}
