//! Data models for storefront.

pub mod deploy;
pub mod session;

pub use deploy::{DeployStatus, DeployStatusKind};
pub use session::{StoredCart, keys as session_keys};
