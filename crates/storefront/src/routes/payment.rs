//! Checkout and simulated payment route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State};
use serde::Deserialize;
use tracing::{info, instrument};

use twb_core::{PaymentMethod, format_amount};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::routes::cart::{CartView, cart_view};
use crate::services::PaymentReceipt;
use crate::state::AppState;

/// One payment method radio option.
#[derive(Debug, Clone)]
pub struct PaymentOption {
    pub value: &'static str,
    pub label: &'static str,
    pub checked: bool,
}

fn payment_options() -> Vec<PaymentOption> {
    let default = PaymentMethod::default();
    PaymentMethod::ALL
        .iter()
        .map(|method| PaymentOption {
            value: method.as_str(),
            label: method.label(),
            checked: *method == default,
        })
        .collect()
}

/// Payment form data.
#[derive(Debug, Deserialize)]
pub struct PaymentForm {
    #[serde(default)]
    pub method: PaymentMethod,
}

/// Receipt display data.
#[derive(Debug, Clone)]
pub struct ReceiptView {
    pub order_number: String,
    pub method: &'static str,
    pub amount: String,
    pub paid_at: String,
    pub ready_from: u32,
    pub ready_to: u32,
}

impl From<&PaymentReceipt> for ReceiptView {
    fn from(receipt: &PaymentReceipt) -> Self {
        Self {
            order_number: receipt.order_number.clone(),
            method: receipt.method.label(),
            amount: format_amount(receipt.amount),
            paid_at: receipt.paid_at.format("%Y-%m-%d %H:%M").to_string(),
            ready_from: receipt.ready_in_minutes.0,
            ready_to: receipt.ready_in_minutes.1,
        }
    }
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "payment/show.html")]
pub struct PaymentShowTemplate {
    pub cart: CartView,
    pub options: Vec<PaymentOption>,
    pub cart_count: u64,
}

/// Payment success page template.
#[derive(Template, WebTemplate)]
#[template(path = "payment/success.html")]
pub struct PaymentSuccessTemplate {
    pub receipt: ReceiptView,
    pub cart_count: u64,
}

/// Display the checkout page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<PaymentShowTemplate> {
    let cart = cart_view(&state)?;
    Ok(PaymentShowTemplate {
        cart_count: cart.item_count,
        cart,
        options: payment_options(),
    })
}

/// Run the simulated payment and show the receipt.
///
/// The totals are snapshotted before the delay; the cart itself is left
/// untouched.
#[instrument(skip(state))]
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<PaymentForm>,
) -> Result<PaymentSuccessTemplate> {
    let (totals, cart_count) = state.with_cart(|store| {
        let cart = store.cart();
        (
            (!cart.is_empty()).then(|| cart.totals()),
            cart.item_count(),
        )
    })?;
    let totals = totals.ok_or_else(|| AppError::BadRequest("cart is empty".to_string()))?;

    add_breadcrumb(
        "checkout",
        "Payment started",
        Some(&[("method", form.method.as_str())]),
    );
    let receipt = state.payments().process(&totals, form.method).await;
    info!(order_number = %receipt.order_number, "Checkout complete");

    Ok(PaymentSuccessTemplate {
        receipt: ReceiptView::from(&receipt),
        cart_count,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_default_method_is_checked() {
        let options = payment_options();
        assert_eq!(options.len(), 3);
        let checked: Vec<_> = options.iter().filter(|o| o.checked).collect();
        assert_eq!(checked.len(), 1);
        assert_eq!(checked[0].value, "card");
    }

    #[test]
    fn test_receipt_view() {
        let receipt = PaymentReceipt {
            order_number: "TWB-20241120-001".to_string(),
            method: PaymentMethod::Cash,
            amount: Decimal::new(95, 1),
            paid_at: Utc
                .with_ymd_and_hms(2024, 11, 20, 7, 30, 0)
                .single()
                .unwrap_or_default(),
            ready_in_minutes: (15, 20),
        };

        let view = ReceiptView::from(&receipt);
        assert_eq!(view.amount, "9.50");
        assert_eq!(view.paid_at, "2024-11-20 07:30");
        assert_eq!(view.ready_from, 15);
        assert_eq!(view.ready_to, 20);
    }
}
