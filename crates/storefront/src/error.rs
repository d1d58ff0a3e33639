//! Unified error handling with Sentry integration.
//!
//! All route handlers return `Result<T, AppError>`. Storefront errors are
//! rendered as plain text; deploy errors as the JSON status body the deploy
//! API always returns. Server-side failures are logged and captured to Sentry
//! before responding.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::DeployStatus;
use crate::models::deploy::{DEPLOY_FAILED, DEPLOY_UNAUTHORIZED};
use crate::services::cart::CartError;
use crate::services::jenkins::JenkinsError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Unknown product on a page lookup.
    #[error("Product not found")]
    NotFound,

    /// Unknown or malformed product id submitted to the cart.
    #[error("Invalid product")]
    InvalidProduct,

    /// Missing or wrong deploy secret.
    #[error("Unauthorized deployment request")]
    Unauthorized,

    /// Jenkins could not be reached or refused the build.
    #[error("Jenkins error: {0}")]
    Upstream(#[from] JenkinsError),

    /// Session store failure.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::InvalidProduct(_) => Self::InvalidProduct,
            CartError::Session(e) => Self::Session(e),
        }
    }
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InvalidProduct => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Upstream(_) | Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Upstream(_) | Self::Session(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();

        match self {
            Self::Unauthorized => {
                (status, Json(DeployStatus::error(DEPLOY_UNAUTHORIZED))).into_response()
            }
            Self::Upstream(_) => (status, Json(DeployStatus::error(DEPLOY_FAILED))).into_response(),
            // Don't expose internal error details to clients
            Self::Session(_) => (status, "Internal server error").into_response(),
            Self::NotFound | Self::InvalidProduct => (status, self.to_string()).into_response(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
