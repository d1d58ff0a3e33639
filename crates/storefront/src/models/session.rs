//! Session-related types.
//!
//! Keys and payloads stored in the visitor's session record.

use serde::{Deserialize, Serialize};

use devopshub_core::ProductId;

/// Cart contents as persisted in the session.
///
/// Only ids are stored; they are resolved against the catalog on read, so a
/// session record never holds a stale copy of product data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoredCart(pub Vec<ProductId>);

/// Session keys.
pub mod keys {
    /// Key for the visitor's cart.
    pub const CART: &str = "cart";
}
