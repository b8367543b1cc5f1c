//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Product listing (same as /products)
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (catalog loaded)
//!
//! # Products
//! GET  /products               - Product listing (?category=&q=)
//! GET  /products/{id}          - Product detail
//!
//! # Cart
//! GET  /cart                   - Cart page with checkout form
//! GET  /cart/count             - Cart count badge (fragment)
//! POST /cart/add               - Add one unit, back to the product page
//! POST /cart/increment         - Add one unit, back to the cart
//! POST /cart/decrement         - Remove one unit, back to the cart
//! POST /cart/remove            - Drop the item, back to the cart
//!
//! # Checkout
//! POST /checkout               - Place the order (303 to /cart, or 422)
//! ```

pub mod cart;
pub mod checkout;
pub mod health;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};
use moodshop_core::{Notice, Shop};

use crate::state::AppState;

/// Notice display data for templates.
#[derive(Clone)]
pub struct NoticeView {
    pub text: String,
    pub class: &'static str,
    /// Milliseconds until the notice should disappear.
    pub expires_in_ms: u128,
}

impl NoticeView {
    fn new(notice: &Notice, shop: &Shop) -> Self {
        let expires_in_ms = shop
            .notices()
            .remaining_at(std::time::Instant::now())
            .map_or(0, |left| left.as_millis());
        Self {
            text: notice.text.clone(),
            class: notice.kind.css_class(),
            expires_in_ms,
        }
    }
}

/// Data every page layout needs.
#[derive(Clone)]
pub struct LayoutView {
    pub notice: Option<NoticeView>,
    pub cart_count: u32,
}

impl From<&Shop> for LayoutView {
    fn from(shop: &Shop) -> Self {
        Self {
            notice: shop.notice().map(|notice| NoticeView::new(notice, shop)),
            cart_count: shop.total_quantity(),
        }
    }
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/increment", post(cart::increment))
        .route("/decrement", post(cart::decrement))
        .route("/remove", post(cart::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", post(checkout::submit))
}
