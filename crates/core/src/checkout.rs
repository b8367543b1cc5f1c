//! Simulated checkout.
//!
//! Checkout only validates that the contact fields were filled in and that
//! the cart has something in it; there is no payment step. A successful
//! checkout snapshots the cart into an [`OrderConfirmation`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::error::ValidationError;
use crate::types::Price;

/// Contact details submitted with the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
}

impl CheckoutForm {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            address: address.into(),
        }
    }

    /// Whether every field has non-whitespace content.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.email, &self.address]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

/// One ordered product, frozen at checkout time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmedLine {
    pub name: String,
    pub quantity: u32,
    pub unit_price: Price,
    pub line_total: Price,
}

/// A placed (simulated) order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderConfirmation {
    pub reference: Uuid,
    pub placed_at: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub address: String,
    pub lines: Vec<ConfirmedLine>,
    pub subtotal: Price,
}

/// Validate `form` against `cart` and build the confirmation.
///
/// Does not touch the cart; the caller clears it once the confirmation is
/// accepted.
///
/// # Errors
///
/// Returns [`ValidationError::MissingFields`] if any field is blank after
/// trimming, otherwise [`ValidationError::EmptyCart`] if the cart has no
/// entries.
pub fn confirm(
    form: &CheckoutForm,
    cart: &Cart,
    catalog: &Catalog,
) -> Result<OrderConfirmation, ValidationError> {
    if !form.is_complete() {
        return Err(ValidationError::MissingFields);
    }
    if cart.is_empty() {
        return Err(ValidationError::EmptyCart);
    }

    let lines = cart
        .lines(catalog)
        .iter()
        .map(|line| ConfirmedLine {
            name: line.product.name.clone(),
            quantity: line.quantity,
            unit_price: line.product.price,
            line_total: line.line_total(),
        })
        .collect();

    Ok(OrderConfirmation {
        reference: Uuid::new_v4(),
        placed_at: Utc::now(),
        name: form.name.trim().to_owned(),
        email: form.email.trim().to_owned(),
        address: form.address.trim().to_owned(),
        lines,
        subtotal: cart.subtotal(catalog),
    })
}
