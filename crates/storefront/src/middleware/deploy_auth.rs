//! Shared-secret authentication for the deploy trigger.

use axum::{extract::FromRequestParts, http::request::Parts};
use secrecy::ExposeSecret;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the deploy shared secret.
pub const DEPLOY_SECRET_HEADER: &str = "x-deploy-secret";

/// Extractor that succeeds only when the request carries the configured
/// deploy secret in [`DEPLOY_SECRET_HEADER`].
///
/// A missing, non-UTF-8, or mismatched header rejects with
/// `AppError::Unauthorized` before the handler body runs.
///
/// # Example
///
/// ```rust,ignore
/// async fn deploy(_: DeploySecret, State(state): State<AppState>) -> impl IntoResponse {
///     // only reached with the right secret
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DeploySecret;

impl FromRequestParts<AppState> for DeploySecret {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let provided = parts
            .headers
            .get(DEPLOY_SECRET_HEADER)
            .and_then(|value| value.to_str().ok());

        match provided {
            Some(secret)
                if constant_time_compare(secret, state.config().deploy_secret.expose_secret()) =>
            {
                Ok(Self)
            }
            Some(_) => {
                tracing::warn!("Deploy request rejected: secret mismatch");
                Err(AppError::Unauthorized)
            }
            None => {
                tracing::warn!("Deploy request rejected: missing {DEPLOY_SECRET_HEADER} header");
                Err(AppError::Unauthorized)
            }
        }
    }
}

/// Constant-time string comparison to prevent timing attacks.
///
/// Length differences still return early; only the content comparison is
/// constant-time.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }

    result == 0
}
