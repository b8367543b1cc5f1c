//! In-memory shopping cart.
//!
//! The cart maps product IDs to quantities in the order items were first
//! added. An entry exists only while its quantity is positive, and no
//! quantity ever exceeds the product's stock as recorded at catalog load.
//! Stock itself is never decremented; the cart is a front-end reservation,
//! not inventory.

use indexmap::IndexMap;

use crate::catalog::{Catalog, Product};
use crate::error::ValidationError;
use crate::types::{Price, ProductId};

/// A cart entry resolved against the catalog.
#[derive(Debug, Clone, Copy)]
pub struct CartLine<'a> {
    pub product: &'a Product,
    pub quantity: u32,
}

impl CartLine<'_> {
    /// Current catalog price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// Product quantities keyed by ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    quantities: IndexMap<ProductId, u32>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Quantity held for `id`, zero when absent.
    #[must_use]
    pub fn quantity(&self, id: &str) -> u32 {
        self.quantities.get(id).copied().unwrap_or(0)
    }

    /// Whether the cart holds an entry for `id`.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.quantities.contains_key(id)
    }

    /// Add one unit of `product`, returning the new quantity.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfStock`] when the product has no stock,
    /// or [`ValidationError::StockLimit`] when the cart already holds every
    /// unit. The cart is unchanged in both cases.
    pub fn add(&mut self, product: &Product) -> Result<u32, ValidationError> {
        if product.stock == 0 {
            return Err(ValidationError::OutOfStock);
        }

        let current = self.quantity(product.id.as_str());
        if current >= product.stock {
            return Err(ValidationError::StockLimit {
                stock: product.stock,
            });
        }

        let quantity = current + 1;
        self.quantities.insert(product.id.clone(), quantity);
        Ok(quantity)
    }

    /// Same as [`Cart::add`].
    ///
    /// # Errors
    ///
    /// See [`Cart::add`].
    pub fn increment(&mut self, product: &Product) -> Result<u32, ValidationError> {
        self.add(product)
    }

    /// Take one unit of `id` out of the cart, dropping the entry at zero.
    ///
    /// Returns `false` if there was no entry.
    pub fn decrement(&mut self, id: &str) -> bool {
        let Some(quantity) = self.quantities.get_mut(id) else {
            return false;
        };

        *quantity -= 1;
        if *quantity == 0 {
            self.quantities.shift_remove(id);
        }
        true
    }

    /// Drop the entry for `id` regardless of quantity.
    ///
    /// Returns `false` if there was no entry.
    pub fn remove(&mut self, id: &str) -> bool {
        self.quantities.shift_remove(id).is_some()
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.quantities.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.quantities
            .values()
            .fold(0_u32, |sum, qty| sum.saturating_add(*qty))
    }

    /// Entries in insertion order, resolved against `catalog`.
    ///
    /// Entries whose product is not in the catalog are left out.
    #[must_use]
    pub fn lines<'a>(&self, catalog: &'a Catalog) -> Vec<CartLine<'a>> {
        self.quantities
            .iter()
            .filter_map(|(id, &quantity)| {
                catalog
                    .get(id.as_str())
                    .map(|product| CartLine { product, quantity })
            })
            .collect()
    }

    /// Subtotal at current catalog prices.
    #[must_use]
    pub fn subtotal(&self, catalog: &Catalog) -> Price {
        self.lines(catalog).iter().map(CartLine::line_total).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::catalog;

    fn catalog() -> Catalog {
        catalog::parse(
            "id,name,category,description,price,stock\n\
             p1,Mug,Kitchen,Stoneware,9.99,2\n\
             p2,Sold Out Lamp,Home,Brass,40,0\n\
             p3,Candle,Calm,Soy,4.50,10",
        )
        .unwrap()
        .catalog
    }

    #[test]
    fn test_add_up_to_stock() {
        let catalog = catalog();
        let mug = catalog.get("p1").unwrap();
        let mut cart = Cart::new();

        assert_eq!(cart.add(mug), Ok(1));
        assert_eq!(cart.add(mug), Ok(2));

        let err = cart.add(mug).unwrap_err();
        assert_eq!(err, ValidationError::StockLimit { stock: 2 });
        assert!(err.to_string().contains("Only 2 in stock"));
        assert_eq!(cart.quantity("p1"), 2);
    }

    #[test]
    fn test_add_out_of_stock() {
        let catalog = catalog();
        let lamp = catalog.get("p2").unwrap();
        let mut cart = Cart::new();

        assert_eq!(cart.add(lamp), Err(ValidationError::OutOfStock));
        assert!(!cart.contains("p2"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_increment_is_add() {
        let catalog = catalog();
        let mug = catalog.get("p1").unwrap();
        let mut cart = Cart::new();

        cart.increment(mug).unwrap();
        cart.increment(mug).unwrap();
        assert!(cart.increment(mug).is_err());
        assert_eq!(cart.quantity("p1"), 2);
    }

    #[test]
    fn test_decrement_to_zero_removes_entry() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(catalog.get("p1").unwrap()).unwrap();
        cart.add(catalog.get("p1").unwrap()).unwrap();

        assert!(cart.decrement("p1"));
        assert_eq!(cart.quantity("p1"), 1);
        assert!(cart.decrement("p1"));
        assert!(!cart.contains("p1"));
        assert!(!cart.decrement("p1"));
    }

    #[test]
    fn test_remove_and_decrement_reach_same_state() {
        let catalog = catalog();
        let candle = catalog.get("p3").unwrap();

        let mut removed = Cart::new();
        removed.add(candle).unwrap();
        removed.add(candle).unwrap();
        assert!(removed.remove("p3"));

        let mut decremented = Cart::new();
        decremented.add(candle).unwrap();
        decremented.add(candle).unwrap();
        decremented.decrement("p3");
        decremented.decrement("p3");

        assert_eq!(removed, decremented);
        assert!(!removed.remove("p3"));
    }

    #[test]
    fn test_totals() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(catalog.get("p3").unwrap()).unwrap();
        cart.add(catalog.get("p1").unwrap()).unwrap();
        cart.add(catalog.get("p3").unwrap()).unwrap();

        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.subtotal(&catalog).display(), "$18.99");

        let lines = cart.lines(&catalog);
        assert_eq!(lines[0].product.id.as_str(), "p3");
        assert_eq!(lines[0].line_total().display(), "$9.00");
        assert_eq!(lines[1].product.id.as_str(), "p1");
    }

    #[test]
    fn test_lines_skip_products_missing_from_catalog() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(catalog.get("p1").unwrap()).unwrap();

        let empty = Catalog::default();
        assert!(cart.lines(&empty).is_empty());
        assert_eq!(cart.subtotal(&empty), Price::ZERO);
    }

    #[test]
    fn test_clear() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(catalog.get("p1").unwrap()).unwrap();
        cart.clear();
        assert_eq!(cart.total_quantity(), 0);
        assert!(cart.is_empty());
    }
}
