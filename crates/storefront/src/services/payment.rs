//! Simulated payment processing.
//!
//! No payment provider is contacted. Processing waits a fixed delay and then
//! always succeeds with a receipt carrying a fresh order number.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, instrument};

use twb_core::{CartTotals, PaymentMethod};

/// Prefix of every order number.
pub const ORDER_NUMBER_PREFIX: &str = "TWB";

/// Preparation window quoted to customers, in minutes.
pub const PREPARATION_MINUTES: (u32, u32) = (15, 20);

/// Result of a successful payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentReceipt {
    pub order_number: String,
    pub method: PaymentMethod,
    pub amount: Decimal,
    pub paid_at: DateTime<Utc>,
    pub ready_in_minutes: (u32, u32),
}

/// Fixed-delay payment simulator.
#[derive(Debug)]
pub struct PaymentSimulator {
    delay: Duration,
    sequence: AtomicU64,
}

impl PaymentSimulator {
    /// Create a simulator that takes `delay` to "process" each payment.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            sequence: AtomicU64::new(0),
        }
    }

    /// Charge `totals.total` with `method`.
    ///
    /// Always succeeds after the configured delay; there is no cancellation
    /// and no retry.
    #[instrument(skip(self, totals), fields(amount = %totals.total))]
    pub async fn process(&self, totals: &CartTotals, method: PaymentMethod) -> PaymentReceipt {
        tokio::time::sleep(self.delay).await;

        let paid_at = Utc::now();
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
        let order_number = format_order_number(paid_at, sequence);

        info!(%order_number, method = method.as_str(), "Payment accepted");

        PaymentReceipt {
            order_number,
            method,
            amount: totals.total,
            paid_at,
            ready_in_minutes: PREPARATION_MINUTES,
        }
    }
}

/// `TWB-YYYYMMDD-NNN`, with the sequence zero-padded to at least 3 digits.
#[must_use]
pub fn format_order_number(date: DateTime<Utc>, sequence: u64) -> String {
    format!(
        "{ORDER_NUMBER_PREFIX}-{}-{sequence:03}",
        date.format("%Y%m%d")
    )
}
