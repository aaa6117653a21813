//! Coupon codes and the flat percentage discount they unlock.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors from coupon redemption.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CouponError {
    /// The entered code is not a reserved coupon.
    #[error("invalid coupon code: {0:?}")]
    Invalid(String),
}

/// The reserved coupon codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coupon {
    Save10,
    Save20,
}

impl Coupon {
    /// Match a code exactly against the reserved literals.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::Invalid` for any other input, including
    /// different casing or surrounding whitespace.
    pub fn parse(code: &str) -> Result<Self, CouponError> {
        match code {
            "SAVE10" => Ok(Self::Save10),
            "SAVE20" => Ok(Self::Save20),
            other => Err(CouponError::Invalid(other.to_owned())),
        }
    }

    /// The literal code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Save10 => "SAVE10",
            Self::Save20 => "SAVE20",
        }
    }

    /// Percentage off the subtotal.
    #[must_use]
    pub const fn percent(&self) -> u8 {
        match self {
            Self::Save10 => 10,
            Self::Save20 => 20,
        }
    }
}

/// A flat percentage discount on the cart subtotal.
///
/// Only ever 0, 10 or 20 percent: it is either empty or built from a
/// [`Coupon`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Discount {
    coupon: Option<Coupon>,
}

impl Discount {
    /// No discount.
    pub const NONE: Self = Self { coupon: None };

    /// The coupon behind this discount, if any.
    #[must_use]
    pub const fn coupon(&self) -> Option<Coupon> {
        self.coupon
    }

    /// Percentage off, 0 when no coupon is applied.
    #[must_use]
    pub const fn percent(&self) -> u8 {
        match self.coupon {
            Some(coupon) => coupon.percent(),
            None => 0,
        }
    }

    /// Whether a coupon is in effect.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.coupon.is_some()
    }

    /// Discount taken off `subtotal`, unrounded.
    #[must_use]
    pub fn amount_off(&self, subtotal: Decimal) -> Decimal {
        subtotal * Decimal::from(self.percent()) / Decimal::ONE_HUNDRED
    }
}

impl From<Coupon> for Discount {
    fn from(coupon: Coupon) -> Self {
        Self {
            coupon: Some(coupon),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_codes_parse() {
        assert_eq!(Coupon::parse("SAVE10"), Ok(Coupon::Save10));
        assert_eq!(Coupon::parse("SAVE20"), Ok(Coupon::Save20));
    }

    #[test]
    fn test_match_is_exact() {
        for code in ["save10", " SAVE10", "SAVE10 ", "SAVE30", ""] {
            assert_eq!(
                Coupon::parse(code),
                Err(CouponError::Invalid(code.to_owned())),
                "{code:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_discount_amount() {
        let discount = Discount::from(Coupon::Save20);
        assert_eq!(discount.percent(), 20);
        assert_eq!(
            discount.amount_off(Decimal::new(1_250, 2)),
            Decimal::new(250, 2)
        );
        assert_eq!(Discount::NONE.amount_off(Decimal::new(99, 0)), Decimal::ZERO);
        assert!(!Discount::default().is_active());
    }

    #[test]
    fn test_discount_remembers_coupon() {
        let discount = Discount::from(Coupon::Save10);
        assert!(discount.is_active());
        assert_eq!(discount.coupon().map(|c| c.code()), Some("SAVE10"));
        assert_eq!(Discount::NONE.coupon(), None);
        assert_eq!(Discount::NONE.percent(), 0);
    }
}
