//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added in `main`)
//! 2. `X-Content-Type-Options: nosniff` on every response
//! 3. `TraceLayer` (request span with method, uri, status, latency)
//! 4. Request ID (record id on the span, echo it back)
//! 5. Session layer (tower-sessions with the in-memory `moka` store)
//!
//! The deploy secret check is an extractor ([`DeploySecret`]) rather than a
//! layer, so it applies only to `POST /deploy`.

pub mod deploy_auth;
pub mod request_id;
pub mod session;

pub use deploy_auth::{DEPLOY_SECRET_HEADER, DeploySecret};
pub use request_id::request_id_middleware;
pub use session::{MokaSessionStore, create_session_layer};
