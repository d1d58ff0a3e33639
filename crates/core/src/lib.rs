//! DevOpsHub Core - Shared domain types.
//!
//! This crate provides the types used by the storefront binary and its tests:
//! product identifiers, prices, products and carts.
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP,
//! no session handling. This keeps it lightweight and trivially testable.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs and prices, plus `Product` and `Cart`

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
