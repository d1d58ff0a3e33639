//! Catalog product.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A purchasable catalog entry.
///
/// Products are defined once at process start and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Stable, unique identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Short description shown on the listing and detail pages.
    pub description: String,
}

impl Product {
    /// Create a new product.
    #[must_use]
    pub fn new(
        id: i32,
        name: impl Into<String>,
        price: u64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.into(),
            price: Price::new(price),
            description: description.into(),
        }
    }
}
