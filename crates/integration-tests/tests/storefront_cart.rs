//! Integration tests for cart mutations, coupons and persistence.

#![allow(clippy::unwrap_used)]

use std::str::FromStr;

use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde_json::Value;

use twb_integration_tests::{TestContext, body_text, location, temp_dir};

fn decimal(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().unwrap()).unwrap()
}

fn lines(cart: &Value) -> &Vec<Value> {
    cart["lines"].as_array().unwrap()
}

// ============================================================================
// Mutations
// ============================================================================

#[tokio::test]
async fn test_adding_same_product_twice_merges_lines() {
    let ctx = TestContext::new();
    ctx.add_to_cart(1, 1).await;
    ctx.add_to_cart(1, 2).await;

    let cart = ctx.cart_json().await;
    assert_eq!(lines(&cart).len(), 1);
    assert_eq!(cart["lines"][0]["id"], 1);
    assert_eq!(cart["lines"][0]["quantity"], 3);
    assert_eq!(cart["item_count"], 3);
}

#[tokio::test]
async fn test_add_redirects_with_see_other() {
    let ctx = TestContext::new();
    let response = ctx
        .post_form("/cart/add", &[("product_id", "3"), ("notes", "no egg")])
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));

    let cart = ctx.cart_json().await;
    assert_eq!(cart["lines"][0]["quantity"], 1);
    assert_eq!(cart["lines"][0]["notes"], "no egg");
}

#[tokio::test]
async fn test_add_keeps_reserved_characters_in_notes() {
    let ctx = TestContext::new();
    ctx.post_form(
        "/cart/add",
        &[("product_id", "5"), ("notes", "less ice & sugar=half, 少糖")],
    )
    .await;

    let cart = ctx.cart_json().await;
    assert_eq!(cart["lines"][0]["notes"], "less ice & sugar=half, 少糖");
}

#[tokio::test]
async fn test_add_with_blank_quantity_adds_one() {
    let ctx = TestContext::new();
    let response = ctx
        .post_form("/cart/add", &[("product_id", "2"), ("quantity", "")])
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));
    assert_eq!(ctx.cart_json().await["lines"][0]["quantity"], 1);
}

#[tokio::test]
async fn test_add_with_garbage_quantity_adds_one() {
    let ctx = TestContext::new();
    let response = ctx
        .post_form("/cart/add", &[("product_id", "2"), ("quantity", "-3")])
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(ctx.cart_json().await["lines"][0]["quantity"], 1);
}

#[tokio::test]
async fn test_add_unknown_product_is_not_found() {
    let ctx = TestContext::new();
    let response = ctx.post_form("/cart/add", &[("product_id", "999")]).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(ctx.cart_json().await["item_count"], 0);
}

#[tokio::test]
async fn test_adjust_never_drops_below_one() {
    let ctx = TestContext::new();
    ctx.add_to_cart(2, 1).await;

    let response = ctx
        .post_form("/cart/adjust", &[("product_id", "2"), ("delta", "-1")])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/cart"));
    assert_eq!(ctx.cart_json().await["lines"][0]["quantity"], 1);

    ctx.post_form("/cart/adjust", &[("product_id", "2"), ("delta", "2")])
        .await;
    assert_eq!(ctx.cart_json().await["lines"][0]["quantity"], 3);
}

#[tokio::test]
async fn test_update_clamps_zero_to_one() {
    let ctx = TestContext::new();
    ctx.add_to_cart(4, 2).await;

    ctx.post_form("/cart/update", &[("product_id", "4"), ("quantity", "5")])
        .await;
    assert_eq!(ctx.cart_json().await["lines"][0]["quantity"], 5);

    ctx.post_form("/cart/update", &[("product_id", "4"), ("quantity", "0")])
        .await;
    assert_eq!(ctx.cart_json().await["lines"][0]["quantity"], 1);
}

#[tokio::test]
async fn test_update_with_blank_quantity_keeps_line() {
    let ctx = TestContext::new();
    ctx.add_to_cart(4, 3).await;

    let response = ctx
        .post_form("/cart/update", &[("product_id", "4"), ("quantity", "")])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/cart"));
    assert_eq!(ctx.cart_json().await["lines"][0]["quantity"], 3);

    let response = ctx
        .post_form("/cart/update", &[("product_id", "4"), ("quantity", "two")])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(ctx.cart_json().await["lines"][0]["quantity"], 3);
}

#[tokio::test]
async fn test_remove_and_clear() {
    let ctx = TestContext::new();
    ctx.add_to_cart(1, 1).await;
    ctx.add_to_cart(5, 1).await;

    ctx.post_form("/cart/remove", &[("product_id", "1")]).await;
    let cart = ctx.cart_json().await;
    assert_eq!(lines(&cart).len(), 1);
    assert_eq!(cart["lines"][0]["id"], 5);

    let response = ctx.post_form("/cart/clear", &[]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(lines(&ctx.cart_json().await).is_empty());
}

#[tokio::test]
async fn test_cart_count_badge() {
    let ctx = TestContext::new();
    ctx.add_to_cart(1, 2).await;
    ctx.add_to_cart(6, 1).await;

    let response = ctx.get("/cart/count").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "3");
}

// ============================================================================
// Totals & Coupons
// ============================================================================

#[tokio::test]
async fn test_totals_include_tax_and_delivery() {
    let ctx = TestContext::new();
    ctx.add_to_cart(1, 3).await;

    let totals = ctx.cart_json().await["totals"].clone();
    assert_eq!(decimal(&totals["subtotal"]), Decimal::new(750, 2));
    assert_eq!(decimal(&totals["tax"]), Decimal::new(75, 2));
    assert_eq!(decimal(&totals["delivery_fee"]), Decimal::new(200, 2));
    assert_eq!(decimal(&totals["total"]), Decimal::new(1025, 2));
}

#[tokio::test]
async fn test_valid_coupon_is_uppercased_and_applied() {
    let ctx = TestContext::new();
    ctx.add_to_cart(1, 3).await;

    let response = ctx.post_form("/cart/coupon", &[("code", "save10")]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let totals = ctx.cart_json().await["totals"].clone();
    assert_eq!(totals["discount_percent"], 10);
    assert_eq!(decimal(&totals["discount_amount"]), Decimal::new(75, 2));
    assert_eq!(decimal(&totals["total"]), Decimal::new(950, 2));
}

#[tokio::test]
async fn test_cart_page_shows_applied_coupon() {
    let ctx = TestContext::new();
    ctx.add_to_cart(1, 1).await;

    let page = body_text(ctx.get("/cart").await).await;
    assert!(!page.contains("applied"));

    ctx.post_form("/cart/coupon", &[("code", "save20")]).await;
    let page = body_text(ctx.get("/cart").await).await;
    assert!(page.contains("SAVE20 applied: 20% off"));
    assert!(page.contains("Discount (20%)"));
}

#[tokio::test]
async fn test_invalid_coupon_shows_message_and_keeps_discount() {
    let ctx = TestContext::new();
    ctx.add_to_cart(1, 1).await;
    ctx.post_form("/cart/coupon", &[("code", "SAVE20")]).await;

    let response = ctx.post_form("/cart/coupon", &[("code", "FREEFOOD")]).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(response).await.contains("Invalid coupon code"));

    assert_eq!(ctx.cart_json().await["totals"]["discount_percent"], 20);
}

// ============================================================================
// Persistence
// ============================================================================

#[tokio::test]
async fn test_cart_survives_restart() {
    let dir = temp_dir();

    let first = TestContext::with_cart_dir(dir.path());
    first.add_to_cart(3, 2).await;
    first
        .post_form("/cart/add", &[("product_id", "5"), ("notes", "less ice")])
        .await;
    drop(first);

    let second = TestContext::with_cart_dir(dir.path());
    let cart = second.cart_json().await;
    assert_eq!(lines(&cart).len(), 2);
    assert_eq!(cart["lines"][0]["id"], 3);
    assert_eq!(cart["lines"][0]["quantity"], 2);
    assert_eq!(cart["lines"][1]["notes"], "less ice");
}

#[tokio::test]
async fn test_clear_empties_persisted_slot() {
    let dir = temp_dir();

    let first = TestContext::with_cart_dir(dir.path());
    first.add_to_cart(1, 1).await;
    first.post_form("/cart/clear", &[]).await;
    drop(first);

    let second = TestContext::with_cart_dir(dir.path());
    assert!(lines(&second.cart_json().await).is_empty());
}

#[tokio::test]
async fn test_discount_is_not_persisted() {
    let dir = temp_dir();

    let first = TestContext::with_cart_dir(dir.path());
    first.add_to_cart(1, 1).await;
    first.post_form("/cart/coupon", &[("code", "SAVE10")]).await;
    drop(first);

    let second = TestContext::with_cart_dir(dir.path());
    let cart = second.cart_json().await;
    assert_eq!(lines(&cart).len(), 1);
    assert_eq!(cart["totals"]["discount_percent"], 0);
}
