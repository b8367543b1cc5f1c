//! Product identifiers.
//!
//! Catalog rows carry free-form string IDs (`p1`, `sku-204`, ...). Wrapping
//! them keeps product IDs from being mixed up with names or categories.

use core::borrow::Borrow;
use core::fmt;

use serde::{Deserialize, Serialize};

/// A product identifier taken verbatim from the catalog's `id` column.
///
/// # Example
///
/// ```rust
/// use moodshop_core::ProductId;
///
/// let id = ProductId::new("p1");
/// assert_eq!(id.as_str(), "p1");
/// assert_eq!(id.to_string(), "p1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new ID from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the ID is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the ID and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ProductId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_lookup_by_str() {
        let mut quantities = HashMap::new();
        quantities.insert(ProductId::new("p1"), 2_u32);
        assert_eq!(quantities.get("p1"), Some(&2));
        assert_eq!(quantities.get("p2"), None);
    }

    #[test]
    fn test_into_inner_and_empty() {
        let id: ProductId = "sku-9".into();
        assert_eq!(id.into_inner(), "sku-9");
        assert!(ProductId::new("").is_empty());
    }
}
