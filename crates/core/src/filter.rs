//! Listing filters.
//!
//! A listing is derived from the catalog on every request: narrow by
//! category, narrow by a case-insensitive name search, then move featured
//! products to the front without disturbing catalog order inside either
//! group.

use serde::Deserialize;

use crate::catalog::Product;

/// Category selector value that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";

/// The user's current category and search input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FilterSelection {
    /// Exact category to show, or [`ALL_CATEGORIES`]. Empty means all.
    #[serde(default)]
    pub category: String,
    /// Free-text name search. Blank means no search.
    #[serde(default, rename = "q")]
    pub search: String,
}

impl FilterSelection {
    #[must_use]
    pub fn new(category: impl Into<String>, search: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            search: search.into(),
        }
    }

    /// The selected category, or `None` when every category is shown.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        let category = self.category.trim();
        (!category.is_empty() && category != ALL_CATEGORIES).then_some(category)
    }

    /// Lowercased, trimmed search text, or `None` when blank.
    #[must_use]
    pub fn search_term(&self) -> Option<String> {
        let term = self.search.trim();
        (!term.is_empty()).then(|| term.to_lowercase())
    }

    /// Whether this selection shows the whole catalog.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.category().is_none() && self.search_term().is_none()
    }
}

/// Apply `selection` to `products`, featured products first.
#[must_use]
pub fn apply<'a>(products: &'a [Product], selection: &FilterSelection) -> Vec<&'a Product> {
    let category = selection.category();
    let term = selection.search_term();

    let (mut featured, rest): (Vec<&Product>, Vec<&Product>) = products
        .iter()
        .filter(|p| category.is_none_or(|c| p.category == c))
        .filter(|p| {
            term.as_deref()
                .is_none_or(|t| p.name.to_lowercase().contains(t))
        })
        .partition(|p| p.featured);

    featured.extend(rest);
    featured
}

/// Distinct categories in the order they first appear.
#[must_use]
pub fn categories(products: &[Product]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for product in products {
        if !seen.contains(&product.category.as_str()) {
            seen.push(&product.category);
        }
    }
    seen
}
