//! Order history.
//!
//! Orders are not persisted; the history page shows a fixed sample.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;

use twb_core::{OrderId, OrderStatus, ProductId};

/// One product in a past order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
}

impl OrderLine {
    /// `price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// A past order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub order_number: String,
    pub items: Vec<OrderLine>,
    pub total: Decimal,
    pub status: OrderStatus,
    pub created_at: NaiveDateTime,
    /// Minutes until pickup, for orders still in progress.
    pub estimated_minutes: Option<u32>,
}

impl Order {
    /// Total number of items across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|l| u64::from(l.quantity)).sum()
    }
}

fn line(id: i32, name: &str, price: Decimal, quantity: u32) -> OrderLine {
    OrderLine {
        product_id: ProductId::new(id),
        name: name.to_owned(),
        price,
        quantity,
    }
}

fn timestamp(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)
}

/// The sample order history, newest first.
#[must_use]
pub fn sample_order_history() -> Vec<Order> {
    let samples = [
        (
            1,
            "TWB-20241120-001",
            vec![
                line(1, "豆漿", Decimal::new(2, 0), 2),
                line(2, "蛋餅", Decimal::new(35, 1), 1),
            ],
            Decimal::new(75, 1),
            OrderStatus::Ready,
            timestamp(2024, 11, 20, 8, 30),
            Some(5),
        ),
        (
            2,
            "TWB-20241119-045",
            vec![
                line(3, "蘿蔔糕", Decimal::new(3, 0), 3),
                line(5, "紅茶", Decimal::new(15, 1), 2),
            ],
            Decimal::new(12, 0),
            OrderStatus::Delivered,
            timestamp(2024, 11, 19, 9, 15),
            None,
        ),
    ];

    samples
        .into_iter()
        .filter_map(
            |(id, number, items, total, status, created_at, estimated_minutes)| {
                Some(Order {
                    id: OrderId::new(id),
                    order_number: number.to_owned(),
                    items,
                    total,
                    status,
                    created_at: created_at?,
                    estimated_minutes,
                })
            },
        )
        .collect()
}
