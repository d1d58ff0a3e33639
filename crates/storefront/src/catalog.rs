//! Static product catalog.
//!
//! The catalog is built once at startup and never mutated, so it is shared
//! between requests without locking.

use devopshub_core::{Product, ProductId};

/// Immutable, in-memory product table.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from a list of products.
    ///
    /// Later duplicates of an id are dropped so lookups stay unambiguous.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        let mut unique: Vec<Product> = Vec::with_capacity(products.len());
        for product in products {
            if unique.iter().any(|p| p.id == product.id) {
                tracing::warn!(
                    product_id = %product.id,
                    "Duplicate product id in catalog, ignoring"
                );
                continue;
            }
            unique.push(product);
        }
        Self { products: unique }
    }

    /// The demo course catalog sold by the storefront.
    #[must_use]
    pub fn demo() -> Self {
        Self::new(vec![
            Product::new(1, "Gen AI", 15000, "AI, ML"),
            Product::new(2, "Full Stack Developer", 45000, "Frontend, Backend, DB"),
            Product::new(3, "Data Science", 25000, "Data Mining, Analytics"),
            Product::new(4, "DEVOPS", 35000, "Automation, CI/CD"),
        ])
    }

    /// All products in display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}
