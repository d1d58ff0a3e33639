//! Deploy API payloads.

use serde::{Deserialize, Serialize};

/// Message returned when a build was started.
pub const DEPLOY_TRIGGERED: &str = "Jenkins build triggered successfully";

/// Message returned when the deploy secret is missing or wrong.
pub const DEPLOY_UNAUTHORIZED: &str = "Unauthorized deployment request";

/// Message returned when Jenkins could not be reached or refused the build.
pub const DEPLOY_FAILED: &str = "Failed to trigger Jenkins build";

/// Outcome of a deploy request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployStatusKind {
    Success,
    Error,
}

/// JSON body of every `/deploy` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployStatus {
    pub status: DeployStatusKind,
    pub message: String,
}

impl DeployStatus {
    /// A success body.
    #[must_use]
    pub fn success(message: &str) -> Self {
        Self {
            status: DeployStatusKind::Success,
            message: message.to_string(),
        }
    }

    /// An error body.
    #[must_use]
    pub fn error(message: &str) -> Self {
        Self {
            status: DeployStatusKind::Error,
            message: message.to_string(),
        }
    }
}
