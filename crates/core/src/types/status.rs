//! Status enums for products.

use serde::{Deserialize, Serialize};

/// Whether a product can currently be added to the cart.
///
/// Derived from the stock count recorded when the catalog was loaded; cart
/// activity never changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    OutOfStock,
}

impl StockStatus {
    /// Status for a recorded stock count.
    #[must_use]
    pub const fn from_stock(stock: u32) -> Self {
        if stock > 0 {
            Self::InStock
        } else {
            Self::OutOfStock
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InStock => "In Stock",
            Self::OutOfStock => "Out of Stock",
        }
    }

    /// Short CSS class name used by the listing grid.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::InStock => "in",
            Self::OutOfStock => "out",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_stock() {
        assert_eq!(StockStatus::from_stock(0), StockStatus::OutOfStock);
        assert_eq!(StockStatus::from_stock(1), StockStatus::InStock);
    }

    #[test]
    fn test_labels() {
        assert_eq!(StockStatus::InStock.label(), "In Stock");
        assert_eq!(StockStatus::OutOfStock.css_class(), "out");
    }
}
