//! Cart route handlers.
//!
//! Cart actions are plain form posts that redirect back to a page, so the
//! storefront works without JavaScript. Accepted and rejected actions alike
//! leave their message on the shop's notice board for the next page render.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use moodshop_core::cart::CartLine;
use moodshop_core::{Action, CheckoutForm, ProductId, Shop, ValidationError};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::routes::LayoutView;
use crate::routes::checkout::ConfirmationView;
use crate::routes::products::product_path;
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

impl From<&CartLine<'_>> for CartItemView {
    fn from(line: &CartLine<'_>) -> Self {
        Self {
            id: line.product.id.to_string(),
            name: line.product.name.clone(),
            quantity: line.quantity,
            price: line.product.price.display(),
            line_price: line.line_total().display(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl From<&Shop> for CartView {
    fn from(shop: &Shop) -> Self {
        Self {
            items: shop.cart_lines().iter().map(CartItemView::from).collect(),
            subtotal: shop.subtotal().display(),
            item_count: shop.total_quantity(),
        }
    }
}

/// Form for any single-product cart action.
#[derive(Debug, Deserialize)]
pub struct CartItemForm {
    pub product_id: String,
}

impl CartItemForm {
    fn product_id(&self) -> Result<ProductId> {
        let id = self.product_id.trim();
        if id.is_empty() {
            return Err(AppError::BadRequest("missing product_id".to_string()));
        }
        Ok(ProductId::new(id))
    }
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub layout: LayoutView,
    pub cart: CartView,
    pub form: CheckoutForm,
    pub confirmation: Option<ConfirmationView>,
}

impl CartShowTemplate {
    /// Render the cart with `form` prefilled.
    #[must_use]
    pub fn new(shop: &Shop, form: CheckoutForm) -> Self {
        Self {
            layout: LayoutView::from(shop),
            cart: CartView::from(shop),
            form,
            confirmation: shop.confirmation().map(ConfirmationView::from),
        }
    }
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Display cart page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<CartShowTemplate> {
    let shop = state.shop()?;
    Ok(CartShowTemplate::new(&shop, CheckoutForm::default()))
}

/// Get cart count badge.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Result<CartCountTemplate> {
    let shop = state.shop()?;
    Ok(CartCountTemplate {
        count: shop.total_quantity(),
    })
}

/// Add one unit and return to the product page.
#[instrument(skip(state))]
pub async fn add(State(state): State<AppState>, Form(form): Form<CartItemForm>) -> Result<Response> {
    let id = form.product_id()?;
    let back = match apply(&state, "Added to cart", id.clone(), Action::AddToCart)? {
        // There is no product page to return to.
        Some(ValidationError::UnknownProduct(_)) => "/products".to_string(),
        _ => product_path(id.as_str()),
    };
    Ok(Redirect::to(&back).into_response())
}

/// Add one unit from the cart page.
#[instrument(skip(state))]
pub async fn increment(
    State(state): State<AppState>,
    Form(form): Form<CartItemForm>,
) -> Result<Response> {
    apply(&state, "Incremented quantity", form.product_id()?, Action::Increment)?;
    Ok(Redirect::to("/cart").into_response())
}

/// Remove one unit from the cart page.
#[instrument(skip(state))]
pub async fn decrement(
    State(state): State<AppState>,
    Form(form): Form<CartItemForm>,
) -> Result<Response> {
    apply(&state, "Decremented quantity", form.product_id()?, Action::Decrement)?;
    Ok(Redirect::to("/cart").into_response())
}

/// Drop an item from the cart page.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<CartItemForm>,
) -> Result<Response> {
    apply(&state, "Removed from cart", form.product_id()?, Action::Remove)?;
    Ok(Redirect::to("/cart").into_response())
}

/// Dispatch a cart action and hand back the rejection, if any. Rejections are
/// already on the notice board, so only lock failures are errors here.
fn apply(
    state: &AppState,
    message: &str,
    id: ProductId,
    action: fn(ProductId) -> Action,
) -> Result<Option<ValidationError>> {
    let product_id = id.to_string();
    let mut shop = state.shop()?;

    match shop.dispatch(action(id)) {
        Ok(outcome) => {
            tracing::info!(%product_id, ?outcome, "Cart updated");
            add_breadcrumb("cart", message, Some(&[("product_id", product_id.as_str())]));
            Ok(None)
        }
        Err(e) => {
            tracing::info!(%product_id, reason = %e, "Cart action rejected");
            Ok(Some(e))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::time::Duration;

    use moodshop_core::catalog;

    use super::*;

    #[test]
    fn test_cart_view() {
        let mut shop = Shop::new(Duration::from_secs(5));
        shop.install_catalog(
            catalog::parse(
                "id,name,category,description,price,stock\n\
                 p1,Mug,Kitchen,Stoneware,9.99,2",
            )
            .unwrap()
            .catalog,
        );
        shop.dispatch(Action::AddToCart(ProductId::new("p1"))).unwrap();
        shop.dispatch(Action::AddToCart(ProductId::new("p1"))).unwrap();

        let view = CartView::from(&shop);
        assert_eq!(view.item_count, 2);
        assert_eq!(view.subtotal, "$19.98");
        assert_eq!(view.items[0].line_price, "$19.98");
        assert_eq!(view.items[0].price, "$9.99");
    }

    #[test]
    fn test_blank_product_id_is_bad_request() {
        let form = CartItemForm {
            product_id: "  ".to_string(),
        };
        assert!(matches!(form.product_id(), Err(AppError::BadRequest(_))));
    }
}
