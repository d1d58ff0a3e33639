//! Shopping cart.

use serde::{Deserialize, Serialize};

use super::{Price, Product, ProductId};

/// An ordered list of products awaiting checkout.
///
/// Duplicates are allowed; adding the same product twice means a quantity of
/// two. Entry order is insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<Product>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Number of entries, counting duplicates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of the prices of all entries. Zero for an empty cart.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(|p| p.price).sum()
    }

    /// Ids of all entries, in order.
    pub fn product_ids(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.items.iter().map(|p| p.id)
    }
}

impl FromIterator<Product> for Cart {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
