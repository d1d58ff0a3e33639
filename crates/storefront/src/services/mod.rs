//! Business logic services for storefront.
//!
//! # Services
//!
//! - `cart` - Session-backed cart operations against the catalog
//! - `jenkins` - Remote build trigger for the deploy endpoint

pub mod cart;
pub mod jenkins;
