//! Money formatting using decimal arithmetic.
//!
//! Amounts are carried at full precision through every calculation and only
//! rounded to two places when formatted for display.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places shown to customers.
pub const DISPLAY_DECIMAL_PLACES: u32 = 2;

/// Round an amount for display, half away from zero.
#[must_use]
fn round_for_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(
        DISPLAY_DECIMAL_PLACES,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Format an amount with exactly two decimal places and no currency symbol.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = round_for_display(amount);
    rounded.rescale(DISPLAY_DECIMAL_PLACES);
    rounded.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pads_to_two_places() {
        assert_eq!(format_amount(Decimal::new(2, 0)), "2.00");
        assert_eq!(format_amount(Decimal::new(75, 1)), "7.50");
    }

    #[test]
    fn test_format_rounds_midpoint_away_from_zero() {
        assert_eq!(format_amount(Decimal::new(1_005, 3)), "1.01");
        assert_eq!(format_amount(Decimal::new(1_004, 3)), "1.00");
        assert_eq!(format_amount(Decimal::new(-1_005, 3)), "-1.01");
    }

    #[test]
    fn test_round_keeps_full_precision_until_asked() {
        let third = Decimal::ONE / Decimal::new(3, 0);
        assert!(third.scale() > DISPLAY_DECIMAL_PLACES);
        assert_eq!(round_for_display(third), Decimal::new(33, 2));
    }
}
