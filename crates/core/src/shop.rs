//! The shop controller.
//!
//! [`Shop`] owns everything a shopper's session touches: the loaded catalog,
//! the cart, the message slot and the last order confirmation. Reads are
//! plain accessors; every mutation goes through [`Shop::dispatch`] so the
//! rules for stock limits, messages and checkout live in one place and can be
//! exercised without any HTTP or HTML in the way.

use std::time::Duration;

use uuid::Uuid;

use crate::cart::{Cart, CartLine};
use crate::catalog::{Catalog, Product};
use crate::checkout::{self, CheckoutForm, OrderConfirmation};
use crate::error::ValidationError;
use crate::filter::{self, FilterSelection};
use crate::notice::{Notice, NoticeBoard};
use crate::types::{Price, ProductId};

/// Message shown when the catalog resource cannot be loaded.
pub const CATALOG_UNAVAILABLE_MESSAGE: &str =
    "Could not load the product catalog. Check that the catalog file is available.";

/// Where the catalog load stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogStatus {
    /// The startup load has not finished yet.
    #[default]
    Loading,
    Ready,
    /// The load failed; the catalog stays empty for the rest of the run.
    Failed(String),
}

/// A shopper action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddToCart(ProductId),
    Increment(ProductId),
    Decrement(ProductId),
    Remove(ProductId),
    Checkout(CheckoutForm),
}

/// What an accepted action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The product's quantity is now `quantity` (zero when dropped).
    QuantityChanged { quantity: u32 },
    /// The entry was removed.
    Removed,
    /// Nothing to do, e.g. decrementing a product that is not in the cart.
    Unchanged,
    /// An order was placed and the cart cleared.
    CheckedOut { reference: Uuid },
}

/// Application state for one shopper.
#[derive(Debug, Default)]
pub struct Shop {
    status: CatalogStatus,
    catalog: Catalog,
    cart: Cart,
    notices: NoticeBoard,
    confirmation: Option<OrderConfirmation>,
}

impl Shop {
    /// An empty shop waiting for its catalog.
    #[must_use]
    pub fn new(notice_ttl: Duration) -> Self {
        Self {
            notices: NoticeBoard::new(notice_ttl),
            ..Self::default()
        }
    }

    /// Install a freshly loaded catalog.
    pub fn install_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        self.status = CatalogStatus::Ready;
    }

    /// Record a failed load. The catalog is left empty and the shopper is
    /// told.
    pub fn fail_catalog(&mut self, reason: impl Into<String>) {
        self.catalog = Catalog::default();
        self.status = CatalogStatus::Failed(reason.into());
        self.notices.post(Notice::error(CATALOG_UNAVAILABLE_MESSAGE));
    }

    #[must_use]
    pub const fn status(&self) -> &CatalogStatus {
        &self.status
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Products to list for `selection`.
    #[must_use]
    pub fn listing(&self, selection: &FilterSelection) -> Vec<&Product> {
        filter::apply(self.catalog.products(), selection)
    }

    /// Distinct categories for the category selector.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        filter::categories(self.catalog.products())
    }

    #[must_use]
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.catalog.get(id)
    }

    #[must_use]
    pub fn cart_lines(&self) -> Vec<CartLine<'_>> {
        self.cart.lines(&self.catalog)
    }

    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.cart.total_quantity()
    }

    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.cart.subtotal(&self.catalog)
    }

    /// The message currently visible, if any.
    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notices.current()
    }

    #[must_use]
    pub const fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    /// The most recent order, until the next item is added to the cart.
    #[must_use]
    pub const fn confirmation(&self) -> Option<&OrderConfirmation> {
        self.confirmation.as_ref()
    }

    /// Apply a shopper action.
    ///
    /// Success and failure messages are posted to the notice board either
    /// way; a rejected action leaves the shop unchanged.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] that rejected the action.
    pub fn dispatch(&mut self, action: Action) -> Result<Outcome, ValidationError> {
        let result = self.apply(action);
        if let Err(err) = &result {
            self.notices.post(Notice::error(err.to_string()));
        }
        result
    }

    fn apply(&mut self, action: Action) -> Result<Outcome, ValidationError> {
        match action {
            Action::AddToCart(id) => self.add(id, Cart::add),
            Action::Increment(id) => self.add(id, Cart::increment),
            Action::Decrement(id) => Ok(self.decrement(&id)),
            Action::Remove(id) => Ok(self.remove(&id)),
            Action::Checkout(form) => self.checkout(&form),
        }
    }

    fn add(
        &mut self,
        id: ProductId,
        step: fn(&mut Cart, &Product) -> Result<u32, ValidationError>,
    ) -> Result<Outcome, ValidationError> {
        let product = self
            .catalog
            .get(id.as_str())
            .ok_or(ValidationError::UnknownProduct(id))?;

        let quantity = step(&mut self.cart, product)?;
        let message = format!("{} added to cart.", product.name);

        // A new order has started; the previous confirmation is stale.
        self.confirmation = None;
        self.notices.post(Notice::success(message));
        Ok(Outcome::QuantityChanged { quantity })
    }

    fn decrement(&mut self, id: &ProductId) -> Outcome {
        if !self.cart.decrement(id.as_str()) {
            return Outcome::Unchanged;
        }
        self.notices.post(Notice::success("Item quantity updated."));
        Outcome::QuantityChanged {
            quantity: self.cart.quantity(id.as_str()),
        }
    }

    fn remove(&mut self, id: &ProductId) -> Outcome {
        if !self.cart.remove(id.as_str()) {
            return Outcome::Unchanged;
        }
        self.notices.post(Notice::success("Item removed from cart."));
        Outcome::Removed
    }

    fn checkout(&mut self, form: &CheckoutForm) -> Result<Outcome, ValidationError> {
        let order = checkout::confirm(form, &self.cart, &self.catalog)?;
        let reference = order.reference;

        self.cart.clear();
        self.confirmation = Some(order);
        self.notices.post(Notice::success("Checkout complete."));
        Ok(Outcome::CheckedOut { reference })
    }
}
