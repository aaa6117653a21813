//! Integration tests for the menu, product pages and JSON API.

#![allow(clippy::unwrap_used)]

use axum::http::{StatusCode, header};
use serde_json::Value;

use twb_integration_tests::{TestContext, body_json, body_text};

async fn product_ids(ctx: &TestContext, uri: &str) -> Vec<i64> {
    let response = ctx.get(uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response)
        .await
        .as_array()
        .unwrap()
        .iter()
        .map(|p: &Value| p["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new();
    let response = ctx.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn test_menu_lists_every_sample_product() {
    let ctx = TestContext::new();
    let response = ctx.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    for name in ["豆漿", "鍋燒意麵", "飯糰", "冰咖啡", "芋頭鮮奶茶", "鮮榨柳橙汁"] {
        assert!(body.contains(name), "missing {name}");
    }
}

#[tokio::test]
async fn test_menu_filters_by_category() {
    let ctx = TestContext::new();

    assert_eq!(
        product_ids(&ctx, "/api/products?category=MAIN").await,
        vec![2, 3]
    );
    assert_eq!(
        product_ids(&ctx, "/api/products?category=ALL").await,
        vec![1, 2, 3, 4, 5, 6]
    );
    assert!(product_ids(&ctx, "/api/products?category=SIDE").await.is_empty());
}

#[tokio::test]
async fn test_menu_search_matches_names_and_descriptions() {
    let ctx = TestContext::new();

    // Case-insensitive English name
    assert_eq!(product_ids(&ctx, "/api/products?q=COFFEE").await, vec![4]);
    // Description
    assert_eq!(product_ids(&ctx, "/api/products?q=broth").await, vec![2]);
    // Localized name (鮮 = %E9%AE%AE)
    assert_eq!(
        product_ids(&ctx, "/api/products?q=%E9%AE%AE").await,
        vec![5, 6]
    );
    // Search and category combined
    assert_eq!(
        product_ids(&ctx, "/api/products?q=milk&category=DRINK").await,
        vec![1, 4, 5]
    );
}

#[tokio::test]
async fn test_product_page() {
    let ctx = TestContext::new();
    let response = ctx.get("/products/3").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("Fan Tuan"));
    assert!(body.contains("$5.50"));
    assert!(body.contains(r#"action="/cart/add""#));
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let ctx = TestContext::new();
    let response = ctx.get("/products/42").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_responses_carry_security_headers_and_request_id() {
    let ctx = TestContext::new();
    let response = ctx.get("/").await;

    let headers = response.headers();
    assert_eq!(headers.get(header::X_FRAME_OPTIONS).unwrap(), "DENY");
    assert!(headers.get(header::CONTENT_SECURITY_POLICY).is_some());
    assert!(headers.get("x-request-id").is_some());
}
