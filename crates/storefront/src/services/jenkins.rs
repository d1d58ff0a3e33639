//! Jenkins remote build trigger.
//!
//! Starts a build of a single configured job with
//! `POST {JENKINS_URL}/job/{JENKINS_JOB}/build`, authenticated with HTTP basic
//! auth (user + API token). Each call issues exactly one request: there is no
//! retry and no de-duplication of concurrent triggers.

use std::sync::Arc;

use reqwest::{Client, redirect};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::{info, instrument};
use url::Url;

use crate::config::JenkinsConfig;

/// Maximum number of response body characters kept for diagnostics.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Errors that can occur when triggering a Jenkins build.
#[derive(Debug, Error)]
pub enum JenkinsError {
    /// The HTTP client could not be constructed.
    #[error("Jenkins client setup failed: {0}")]
    Client(#[source] reqwest::Error),

    /// The request did not complete within the configured timeout.
    #[error("Jenkins request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    /// Connection or transport failure.
    #[error("Jenkins request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// Jenkins answered with a non-2xx status.
    #[error("Jenkins returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

impl From<reqwest::Error> for JenkinsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else {
            Self::Request(err)
        }
    }
}

/// Client for the Jenkins remote access API.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct JenkinsClient {
    inner: Arc<JenkinsClientInner>,
}

struct JenkinsClientInner {
    client: Client,
    build_url: Url,
    user: String,
    token: SecretString,
}

impl std::fmt::Debug for JenkinsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JenkinsClient")
            .field("build_url", &self.inner.build_url.as_str())
            .field("user", &self.inner.user)
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl JenkinsClient {
    /// Create a new Jenkins client.
    ///
    /// Redirects are not followed: Jenkins answers a successful trigger with
    /// `201 Created`, while a redirect usually points at a login page.
    ///
    /// # Errors
    ///
    /// Returns `JenkinsError::Client` if the HTTP client cannot be built.
    pub fn new(config: &JenkinsConfig) -> Result<Self, JenkinsError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .redirect(redirect::Policy::none())
            .build()
            .map_err(JenkinsError::Client)?;

        Ok(Self {
            inner: Arc::new(JenkinsClientInner {
                client,
                build_url: config.build_url(),
                user: config.user.clone(),
                token: config.token.clone(),
            }),
        })
    }

    /// The URL that `trigger_build` posts to.
    #[must_use]
    pub fn build_url(&self) -> &Url {
        &self.inner.build_url
    }

    /// Start a build of the configured job.
    ///
    /// Any 2xx response counts as success.
    ///
    /// # Errors
    ///
    /// Returns `JenkinsError` on transport failure, timeout, or a non-2xx
    /// response.
    #[instrument(skip(self), fields(url = %self.inner.build_url))]
    pub async fn trigger_build(&self) -> Result<(), JenkinsError> {
        let response = self
            .inner
            .client
            .post(self.inner.build_url.clone())
            .basic_auth(&self.inner.user, Some(self.inner.token.expose_secret()))
            .json(&serde_json::json!({}))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(JenkinsError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        info!(status = status.as_u16(), "Jenkins build triggered");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn config(url: &str) -> JenkinsConfig {
        JenkinsConfig {
            url: Url::parse(url).unwrap(),
            job: "deploy".to_string(),
            user: "ci".to_string(),
            token: SecretString::from("tok-123456"),
            timeout: Duration::from_secs(2),
        }
    }

    #[test]
    fn test_build_url_from_config() {
        let client = JenkinsClient::new(&config("http://jenkins:8080")).unwrap();
        assert_eq!(
            client.build_url().as_str(),
            "http://jenkins:8080/job/deploy/build"
        );
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = JenkinsClient::new(&config("http://jenkins:8080")).unwrap();
        let debug_output = format!("{client:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("tok-123456"));
    }

    #[test]
    fn test_status_error_display() {
        let err = JenkinsError::Status {
            status: 403,
            body: "No valid crumb".to_string(),
        };
        assert_eq!(err.to_string(), "Jenkins returned HTTP 403: No valid crumb");
    }

    #[tokio::test]
    async fn test_connection_refused_is_request_error() {
        // Reserve a port, then free it so nothing is listening there.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = JenkinsClient::new(&config(&format!("http://{addr}"))).unwrap();
        let err = client.trigger_build().await.unwrap_err();
        assert!(matches!(err, JenkinsError::Request(_)), "got {err}");
    }

    #[tokio::test]
    async fn test_silent_server_is_timeout_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // Accept connections and hold them open without replying.
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let mut cfg = config(&format!("http://{addr}"));
        cfg.timeout = Duration::from_millis(300);
        let client = JenkinsClient::new(&cfg).unwrap();

        let err = client.trigger_build().await.unwrap_err();
        assert!(matches!(err, JenkinsError::Timeout(_)), "got {err}");
    }
}
