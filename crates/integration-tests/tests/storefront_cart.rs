//! Integration tests for cart actions and notices.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use moodshop_integration_tests::{SAMPLE_CATALOG, TestApp, body_text, location};

#[tokio::test]
async fn test_add_redirects_to_product_with_notice() {
    let app = TestApp::with_catalog(SAMPLE_CATALOG).await.unwrap();

    let response = app.post_form("/cart/add", "product_id=p1").await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/products/p1"));

    let (_, body) = app.page("/products/p1").await.unwrap();
    assert!(body.contains("Mug added to cart."));
    assert!(body.contains("notice-success"));
    assert!(body.contains("Cart (1)"));
}

#[tokio::test]
async fn test_add_beyond_stock_is_rejected() {
    let app = TestApp::with_catalog(SAMPLE_CATALOG).await.unwrap();

    for _ in 0..3 {
        app.post_form("/cart/add", "product_id=p1").await.unwrap();
    }

    let (_, body) = app.page("/products/p1").await.unwrap();
    assert!(body.contains("Cannot add more. Only 2 in stock."));
    assert!(body.contains("notice-error"));
    assert!(body.contains("Cart (2)"));
}

#[tokio::test]
async fn test_add_out_of_stock() {
    let app = TestApp::with_catalog(SAMPLE_CATALOG).await.unwrap();

    app.post_form("/cart/add", "product_id=p3").await.unwrap();

    let (_, body) = app.page("/products/p3").await.unwrap();
    assert!(body.contains("This item is out of stock."));
    assert!(body.contains("Cart (0)"));
}

#[tokio::test]
async fn test_add_unknown_product_posts_error() {
    let app = TestApp::with_catalog(SAMPLE_CATALOG).await.unwrap();

    let response = app.post_form("/cart/add", "product_id=ghost").await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/products"));

    let (status, body) = app.page("/products").await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("That product could not be found."));
    assert!(body.contains("Cart (0)"));
}

#[tokio::test]
async fn test_blank_product_id_is_bad_request() {
    let app = TestApp::with_catalog(SAMPLE_CATALOG).await.unwrap();

    let response = app.post_form("/cart/add", "product_id=").await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cart_page_lists_lines_and_subtotal() {
    let app = TestApp::with_catalog(SAMPLE_CATALOG).await.unwrap();
    app.post_form("/cart/add", "product_id=p1").await.unwrap();
    app.post_form("/cart/add", "product_id=p1").await.unwrap();
    app.post_form("/cart/add", "product_id=p4").await.unwrap();

    let (status, body) = app.page("/cart").await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Mug"));
    assert!(body.contains("$19.98"));
    assert!(body.contains("Lavender Soap"));
    assert!(body.contains("Subtotal: $26.23"));
    assert!(body.contains("Cart (3)"));
}

#[tokio::test]
async fn test_empty_cart_page() {
    let app = TestApp::with_catalog(SAMPLE_CATALOG).await.unwrap();
    let (_, body) = app.page("/cart").await.unwrap();

    assert!(body.contains("Cart is empty."));
    assert!(!body.contains("Subtotal:"));
}

#[tokio::test]
async fn test_increment_respects_stock() {
    let app = TestApp::with_catalog(SAMPLE_CATALOG).await.unwrap();
    app.post_form("/cart/add", "product_id=p5").await.unwrap();

    let response = app.post_form("/cart/increment", "product_id=p5").await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/cart"));

    let (_, body) = app.page("/cart").await.unwrap();
    assert!(body.contains("Cannot add more. Only 1 in stock."));
    assert!(body.contains("Cart (1)"));
}

#[tokio::test]
async fn test_decrement_to_zero_removes_line() {
    let app = TestApp::with_catalog(SAMPLE_CATALOG).await.unwrap();
    app.post_form("/cart/add", "product_id=p2").await.unwrap();
    app.post_form("/cart/add", "product_id=p2").await.unwrap();

    app.post_form("/cart/decrement", "product_id=p2").await.unwrap();
    let (_, body) = app.page("/cart").await.unwrap();
    assert!(body.contains("Item quantity updated."));
    assert!(body.contains("Cart (1)"));

    app.post_form("/cart/decrement", "product_id=p2").await.unwrap();
    let (_, body) = app.page("/cart").await.unwrap();
    assert!(body.contains("Cart is empty."));
    assert!(body.contains("Cart (0)"));
}

#[tokio::test]
async fn test_remove_drops_line() {
    let app = TestApp::with_catalog(SAMPLE_CATALOG).await.unwrap();
    app.post_form("/cart/add", "product_id=p4").await.unwrap();
    app.post_form("/cart/add", "product_id=p1").await.unwrap();

    app.post_form("/cart/remove", "product_id=p4").await.unwrap();

    let (_, body) = app.page("/cart").await.unwrap();
    assert!(body.contains("Item removed from cart."));
    assert!(!body.contains("Lavender Soap"));
    assert!(body.contains("Mug"));
}

#[tokio::test]
async fn test_cart_count_fragment() {
    let app = TestApp::with_catalog(SAMPLE_CATALOG).await.unwrap();
    app.post_form("/cart/add", "product_id=p2").await.unwrap();
    app.post_form("/cart/add", "product_id=p4").await.unwrap();

    let response = app.get("/cart/count").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await.unwrap();
    assert_eq!(body.trim(), "Cart (2)");
}
