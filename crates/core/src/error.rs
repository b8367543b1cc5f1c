//! Validation errors raised by cart and checkout operations.
//!
//! These are never fatal: the offending action is a no-op and the `Display`
//! text is shown to the shopper as-is.

use crate::types::ProductId;

/// A rejected cart or checkout action.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The product has no stock at all.
    #[error("This item is out of stock.")]
    OutOfStock,

    /// The cart already holds every unit in stock.
    #[error("Cannot add more. Only {stock} in stock.")]
    StockLimit { stock: u32 },

    /// No product with this ID is in the catalog.
    #[error("That product could not be found.")]
    UnknownProduct(ProductId),

    /// Name, email or address was blank.
    #[error("Please fill out all checkout fields.")]
    MissingFields,

    /// Checkout was submitted with nothing in the cart.
    #[error("Your cart is empty.")]
    EmptyCart,
}
