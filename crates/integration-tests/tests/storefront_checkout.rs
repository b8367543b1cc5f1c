//! Integration tests for checkout.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use moodshop_integration_tests::{SAMPLE_CATALOG, TestApp, body_text, location};

const COMPLETE_FORM: &str = "name=Ada+Lovelace&email=ada%40example.com&address=12+Analytical+Way";

#[tokio::test]
async fn test_checkout_with_empty_cart_is_rejected() {
    let app = TestApp::with_catalog(SAMPLE_CATALOG).await.unwrap();

    let response = app.post_form("/checkout", COMPLETE_FORM).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_text(response).await.unwrap();
    assert!(body.contains("Your cart is empty."));
    assert!(body.contains("value=\"Ada Lovelace\""));
}

#[tokio::test]
async fn test_checkout_with_blank_field_keeps_cart() {
    let app = TestApp::with_catalog(SAMPLE_CATALOG).await.unwrap();
    app.post_form("/cart/add", "product_id=p1").await.unwrap();

    let response = app
        .post_form("/checkout", "name=Ada&email=ada%40example.com&address=+++")
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_text(response).await.unwrap();
    assert!(body.contains("Please fill out all checkout fields."));
    assert!(body.contains("value=\"ada@example.com\""));
    assert!(body.contains("Cart (1)"));
    assert!(!body.contains("Order confirmed!"));
}

#[tokio::test]
async fn test_missing_fields_checked_before_empty_cart() {
    let app = TestApp::with_catalog(SAMPLE_CATALOG).await.unwrap();

    let response = app.post_form("/checkout", "name=Ada").await.unwrap();
    let body = body_text(response).await.unwrap();
    assert!(body.contains("Please fill out all checkout fields."));
}

#[tokio::test]
async fn test_checkout_success_clears_cart_and_confirms() {
    let app = TestApp::with_catalog(SAMPLE_CATALOG).await.unwrap();
    app.post_form("/cart/add", "product_id=p1").await.unwrap();
    app.post_form("/cart/add", "product_id=p2").await.unwrap();

    let response = app.post_form("/checkout", COMPLETE_FORM).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/cart"));

    let (_, body) = app.page("/cart").await.unwrap();
    assert!(body.contains("Order confirmed!"));
    assert!(body.contains("Thanks, Ada Lovelace. A confirmation will be sent to ada@example.com."));
    assert!(body.contains("Shipping to: 12 Analytical Way"));
    assert!(body.contains("Total: $24.49"));
    assert!(body.contains("Checkout complete."));
    assert!(body.contains("Cart (0)"));
    assert!(body.contains("Cart is empty."));
    assert!(body.contains("name=\"name\" value=\"\""));
}

#[tokio::test]
async fn test_confirmation_escapes_html() {
    let app = TestApp::with_catalog(SAMPLE_CATALOG).await.unwrap();
    app.post_form("/cart/add", "product_id=p1").await.unwrap();

    app.post_form(
        "/checkout",
        "name=%3Cb%3EAda%3C%2Fb%3E&email=ada%40example.com&address=Home",
    )
    .await
    .unwrap();

    let (_, body) = app.page("/cart").await.unwrap();
    assert!(!body.contains("<b>Ada</b>"));
    assert!(body.contains("&#60;b&#62;Ada") || body.contains("&lt;b&gt;Ada"));
}

#[tokio::test]
async fn test_next_add_clears_confirmation() {
    let app = TestApp::with_catalog(SAMPLE_CATALOG).await.unwrap();
    app.post_form("/cart/add", "product_id=p1").await.unwrap();
    app.post_form("/checkout", COMPLETE_FORM).await.unwrap();

    app.post_form("/cart/add", "product_id=p4").await.unwrap();

    let (_, body) = app.page("/cart").await.unwrap();
    assert!(!body.contains("Order confirmed!"));
    assert!(body.contains("Cart (1)"));
}
