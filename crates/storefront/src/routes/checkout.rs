//! Checkout route handler.
//!
//! There is no payment step: a complete form with a non-empty cart places
//! the order, clears the cart and redirects to the cart page, where the
//! confirmation is shown under a blank form. A rejected submission re-renders
//! the cart page with the submitted values kept.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use moodshop_core::checkout::ConfirmedLine;
use moodshop_core::{Action, CheckoutForm, OrderConfirmation};
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::routes::cart::CartShowTemplate;
use crate::state::AppState;

/// Confirmed line display data.
#[derive(Clone)]
pub struct ConfirmedLineView {
    pub name: String,
    pub quantity: u32,
    pub line_price: String,
}

impl From<&ConfirmedLine> for ConfirmedLineView {
    fn from(line: &ConfirmedLine) -> Self {
        Self {
            name: line.name.clone(),
            quantity: line.quantity,
            line_price: line.line_total.display(),
        }
    }
}

/// Order confirmation display data.
///
/// Values are plain text; the template escapes them.
#[derive(Clone)]
pub struct ConfirmationView {
    pub reference: String,
    pub placed_at: String,
    pub name: String,
    pub email: String,
    pub address: String,
    pub lines: Vec<ConfirmedLineView>,
    pub subtotal: String,
}

impl From<&OrderConfirmation> for ConfirmationView {
    fn from(order: &OrderConfirmation) -> Self {
        let mut reference = order.reference.simple().to_string();
        reference.truncate(8);

        Self {
            reference: reference.to_uppercase(),
            placed_at: order.placed_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            name: order.name.clone(),
            email: order.email.clone(),
            address: order.address.clone(),
            lines: order.lines.iter().map(ConfirmedLineView::from).collect(),
            subtotal: order.subtotal.display(),
        }
    }
}

/// Submit the checkout form.
#[instrument(skip_all)]
pub async fn submit(State(state): State<AppState>, Form(form): Form<CheckoutForm>) -> Result<Response> {
    let mut shop = state.shop()?;

    match shop.dispatch(Action::Checkout(form.clone())) {
        Ok(outcome) => {
            tracing::info!(?outcome, "Order placed");
            add_breadcrumb("checkout", "Order placed", None);
            Ok(Redirect::to("/cart").into_response())
        }
        Err(e) => {
            tracing::info!(reason = %e, "Checkout rejected");
            Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                CartShowTemplate::new(&shop, form),
            )
                .into_response())
        }
    }
}
