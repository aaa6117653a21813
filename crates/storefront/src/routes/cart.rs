//! Cart route handlers.
//!
//! Every mutation goes through the shared [`CartStore`](crate::services::CartStore),
//! which persists the cart, and then redirects back to the cart page (303).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::{debug, info, instrument};

use twb_core::{Cart, CartTotals, LineItem, ProductId, format_amount};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub product_id: i32,
    pub name: String,
    pub note: Option<String>,
    pub quantity: u32,
    pub unit_price: String,
    pub line_price: String,
}

impl From<&LineItem> for CartLineView {
    fn from(line: &LineItem) -> Self {
        Self {
            product_id: line.product_id.as_i32(),
            name: line.name.clone(),
            note: line.note.clone(),
            quantity: line.quantity,
            unit_price: format_amount(line.unit_price),
            line_price: format_amount(line.line_total()),
        }
    }
}

/// Order summary amounts, formatted for display.
#[derive(Debug, Clone)]
pub struct TotalsView {
    pub subtotal: String,
    pub tax: String,
    pub delivery_fee: String,
    pub discount_percent: u8,
    pub discount_amount: String,
    pub total: String,
}

impl From<&CartTotals> for TotalsView {
    fn from(totals: &CartTotals) -> Self {
        Self {
            subtotal: format_amount(totals.subtotal),
            tax: format_amount(totals.tax),
            delivery_fee: format_amount(totals.delivery_fee),
            discount_percent: totals.discount_percent,
            discount_amount: format_amount(totals.discount_amount),
            total: format_amount(totals.total),
        }
    }
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub totals: TotalsView,
    pub item_count: u64,
    pub has_discount: bool,
    /// Code of the coupon in effect, for the "applied" banner.
    pub applied_coupon: Option<&'static str>,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().iter().map(CartLineView::from).collect(),
            totals: TotalsView::from(&cart.totals()),
            item_count: cart.item_count(),
            has_discount: cart.discount().is_active(),
            applied_coupon: cart.discount().coupon().map(|c| c.code()),
        }
    }
}

impl CartView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Snapshot the cart for rendering.
pub(crate) fn cart_view(state: &AppState) -> Result<CartView> {
    state.with_cart(|store| CartView::from(store.cart()))
}

/// Current badge count.
pub(crate) fn cart_count(state: &AppState) -> Result<u64> {
    state.with_cart(|store| store.cart().item_count())
}

/// Add to cart form data.
///
/// `quantity` comes straight from a number input, so it may be blank.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i32,
    pub quantity: Option<String>,
    pub notes: Option<String>,
}

/// +/- quantity form data.
#[derive(Debug, Deserialize)]
pub struct AdjustCartForm {
    pub product_id: i32,
    pub delta: i64,
}

/// Set quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: i32,
    pub quantity: Option<String>,
}

/// Read a quantity field. Blank or non-numeric input yields `None`.
fn parse_quantity(raw: Option<&str>) -> Option<u32> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: i32,
}

/// Coupon form data.
#[derive(Debug, Deserialize)]
pub struct CouponForm {
    pub code: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub cart_count: u64,
    pub coupon_error: Option<String>,
}

/// Display cart page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<CartShowTemplate> {
    let cart = cart_view(&state)?;
    Ok(CartShowTemplate {
        cart_count: cart.item_count,
        cart,
        coupon_error: None,
    })
}

/// Add a catalog product to the cart.
#[instrument(skip(state))]
pub async fn add(State(state): State<AppState>, Form(form): Form<AddToCartForm>) -> Result<Redirect> {
    let product_id = ProductId::new(form.product_id);
    let product = state
        .catalog()
        .find(product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    let quantity = parse_quantity(form.quantity.as_deref()).unwrap_or(1);
    let item = product.to_line_item(quantity, form.notes);
    state.with_cart(|store| store.add(item))?;

    info!(%product_id, quantity, "Added to cart");
    let id = product_id.to_string();
    add_breadcrumb("cart", "Added item", Some(&[("product_id", id.as_str())]));
    Ok(Redirect::to("/"))
}

/// Increment or decrement a line.
#[instrument(skip(state))]
pub async fn adjust(
    State(state): State<AppState>,
    Form(form): Form<AdjustCartForm>,
) -> Result<Redirect> {
    state.with_cart(|store| store.adjust_quantity(ProductId::new(form.product_id), form.delta))?;
    Ok(Redirect::to("/cart"))
}

/// Set a line's quantity.
///
/// A blank or unreadable quantity leaves the line as it was.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Form(form): Form<UpdateCartForm>,
) -> Result<Redirect> {
    let product_id = ProductId::new(form.product_id);
    match parse_quantity(form.quantity.as_deref()) {
        Some(quantity) => {
            state.with_cart(|store| store.set_quantity(product_id, quantity))?;
        }
        None => debug!(%product_id, "Ignoring unreadable quantity"),
    }
    Ok(Redirect::to("/cart"))
}

/// Remove a line.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Redirect> {
    state.with_cart(|store| store.remove(ProductId::new(form.product_id)))?;
    Ok(Redirect::to("/cart"))
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Result<Redirect> {
    state.with_cart(crate::services::CartStore::clear)?;
    info!("Cart cleared");
    Ok(Redirect::to("/cart"))
}

/// Apply a coupon code.
///
/// The code is upper-cased before matching. An unknown code re-renders the
/// cart page with a rejection message and status 422.
#[instrument(skip(state))]
pub async fn coupon(
    State(state): State<AppState>,
    Form(form): Form<CouponForm>,
) -> Result<Response> {
    let code = form.code.to_uppercase();
    let applied = state.with_cart(|store| store.apply_coupon(&code))?;

    match applied {
        Ok(discount) => {
            info!(percent = discount.percent(), "Coupon applied");
            Ok(Redirect::to("/cart").into_response())
        }
        Err(e) => {
            info!(error = %e, "Coupon rejected");
            let cart = cart_view(&state)?;
            let page = CartShowTemplate {
                cart_count: cart.item_count,
                cart,
                coupon_error: Some("Invalid coupon code".to_string()),
            };
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
    }
}

/// Cart item count badge.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Result<String> {
    Ok(cart_count(&state)?.to_string())
}
