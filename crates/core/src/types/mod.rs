//! Core types for DevOpsHub.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;

pub use cart::Cart;
pub use id::*;
pub use price::Price;
pub use product::Product;
