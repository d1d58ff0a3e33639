//! Deploy trigger route handler.
//!
//! `POST /deploy` starts the configured Jenkins job. The request must carry
//! the shared secret (see [`DeploySecret`]); every authorized request fires
//! exactly one build trigger, with no retry and no de-duplication.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::Result;
use crate::middleware::DeploySecret;
use crate::models::DeployStatus;
use crate::models::deploy::DEPLOY_TRIGGERED;
use crate::services::jenkins::JenkinsError;
use crate::state::AppState;

/// Trigger a Jenkins build.
#[instrument(skip_all)]
pub async fn trigger(
    _auth: DeploySecret,
    State(state): State<AppState>,
) -> Result<Json<DeployStatus>> {
    deploy_outcome(state.jenkins().trigger_build().await)
}

/// Map the result of a build trigger to the deploy response.
///
/// # Errors
///
/// Returns `AppError::Upstream` when the trigger failed.
pub fn deploy_outcome(
    result: std::result::Result<(), JenkinsError>,
) -> Result<Json<DeployStatus>> {
    result?;
    Ok(Json(DeployStatus::success(DEPLOY_TRIGGERED)))
}

#[cfg(test)]
mod tests {
    use crate::error::AppError;
    use crate::models::DeployStatusKind;

    use super::*;

    #[test]
    fn test_success_outcome() {
        let Ok(Json(body)) = deploy_outcome(Ok(())) else {
            panic!("expected success");
        };
        assert_eq!(body.status, DeployStatusKind::Success);
        assert_eq!(body.message, "Jenkins build triggered successfully");
    }

    #[test]
    fn test_failure_outcome() {
        let result = deploy_outcome(Err(JenkinsError::Status {
            status: 401,
            body: "Invalid password/token".to_string(),
        }));
        assert!(matches!(result, Err(AppError::Upstream(_))));
    }
}
