//! Order history route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use twb_core::format_amount;

use crate::error::Result;
use crate::models::{Order, sample_order_history};
use crate::routes::cart::cart_count;
use crate::state::AppState;

/// Order line display data.
#[derive(Debug, Clone)]
pub struct OrderLineView {
    pub name: String,
    pub quantity: u32,
    pub line_price: String,
}

/// Order display data.
#[derive(Debug, Clone)]
pub struct OrderView {
    pub order_number: String,
    pub placed_at: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub items: Vec<OrderLineView>,
    pub item_count: u64,
    pub total: String,
    pub estimated_minutes: Option<u32>,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            order_number: order.order_number.clone(),
            placed_at: order.created_at.format("%Y-%m-%d %H:%M").to_string(),
            status_label: order.status.label(),
            status_class: order.status.css_class(),
            items: order
                .items
                .iter()
                .map(|line| OrderLineView {
                    name: line.name.clone(),
                    quantity: line.quantity,
                    line_price: format_amount(line.line_total()),
                })
                .collect(),
            item_count: order.item_count(),
            total: format_amount(order.total),
            estimated_minutes: order.estimated_minutes,
        }
    }
}

/// Order history page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersTemplate {
    pub orders: Vec<OrderView>,
    pub cart_count: u64,
}

/// Display the order history.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<OrdersTemplate> {
    let orders = sample_order_history();
    Ok(OrdersTemplate {
        orders: orders.iter().map(OrderView::from).collect(),
        cart_count: cart_count(&state)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_view() {
        let orders = sample_order_history();
        let view = OrderView::from(&orders[0]);
        assert_eq!(view.placed_at, "2024-11-20 08:30");
        assert_eq!(view.total, "7.50");
        assert_eq!(view.estimated_minutes, Some(5));
        assert_eq!(view.items[0].line_price, "4.00");
    }
}
