//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `JENKINS_URL` - Jenkins base URL (e.g., `https://ci.example.com`)
//! - `JENKINS_JOB` - Name of the job started by `POST /deploy`
//! - `JENKINS_USER` - Jenkins user for basic authentication
//! - `JENKINS_TOKEN` - Jenkins API token for basic authentication
//! - `DEPLOY_SECRET` - Shared secret expected in the `x-deploy-secret` header
//!
//! ## Optional
//! - `HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` - Listen port (default: 4000)
//! - `JENKINS_TIMEOUT_SECS` - Timeout for the build trigger call (default: 30)
//! - `STATIC_DIR` - Static asset directory (default: crates/storefront/static)
//! - `SESSION_SECURE_COOKIE` - Mark the session cookie `Secure` (default: false)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//!
//! Empty values are treated as unset.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: &str = "4000";
const DEFAULT_JENKINS_TIMEOUT_SECS: &str = "30";
const DEFAULT_STATIC_DIR: &str = "crates/storefront/static";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Whether the session cookie carries the `Secure` attribute
    pub secure_cookies: bool,
    /// Jenkins connection used by the deploy trigger
    pub jenkins: JenkinsConfig,
    /// Shared secret for `POST /deploy`
    pub deploy_secret: SecretString,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

/// Jenkins API configuration.
#[derive(Debug, Clone)]
pub struct JenkinsConfig {
    /// Base URL of the Jenkins server
    pub url: Url,
    /// Job started by the deploy trigger
    pub job: String,
    /// Basic-auth user
    pub user: String,
    /// Basic-auth API token
    pub token: SecretString,
    /// Upper bound on the build trigger call
    pub timeout: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Jenkins variables are checked before `DEPLOY_SECRET`, so an empty
    /// environment reports `JENKINS_URL` first.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let jenkins = JenkinsConfig::from_env(&env)?;
        let deploy_secret = SecretString::from(env.required("DEPLOY_SECRET")?);

        let host = env
            .or_default("HOST", DEFAULT_HOST)
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("HOST".to_string(), e.to_string()))?;
        let port = env
            .or_default("PORT", DEFAULT_PORT)
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_string(), e.to_string()))?;
        let static_dir = PathBuf::from(env.or_default("STATIC_DIR", DEFAULT_STATIC_DIR));
        let secure_cookies = parse_bool(
            "SESSION_SECURE_COOKIE",
            env.optional("SESSION_SECURE_COOKIE"),
        )?;

        Ok(Self {
            host,
            port,
            static_dir,
            secure_cookies,
            jenkins,
            deploy_secret,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl JenkinsConfig {
    fn from_env<F>(env: &Env<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = env.required("JENKINS_URL")?;
        let job = env.required("JENKINS_JOB")?;
        let user = env.required("JENKINS_USER")?;
        let token = SecretString::from(env.required("JENKINS_TOKEN")?);

        let url = parse_base_url("JENKINS_URL", &raw_url)?;

        let timeout_secs = env
            .or_default("JENKINS_TIMEOUT_SECS", DEFAULT_JENKINS_TIMEOUT_SECS)
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("JENKINS_TIMEOUT_SECS".to_string(), e.to_string())
            })?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "JENKINS_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            url,
            job,
            user,
            token,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// URL that starts a build of the configured job:
    /// `{url}/job/{job}/build`.
    ///
    /// The job name is percent-encoded as a single path segment and any
    /// trailing slash on the base URL is ignored.
    #[must_use]
    pub fn build_url(&self) -> Url {
        let mut url = self.url.clone();
        // Base URLs are validated as http(s) at load time, so they always
        // have path segments.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["job", self.job.as_str(), "build"]);
        }
        url
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Environment lookup that treats empty values as unset.
struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get an optional environment variable.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a required environment variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get an environment variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}

/// Parse an absolute http(s) URL that can carry path segments.
fn parse_base_url(var_name: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("expected an http(s) URL, got {raw:?}"),
        ));
    }

    Ok(url)
}

fn parse_bool(var_name: &str, value: Option<String>) -> Result<bool, ConfigError> {
    match value.as_deref().map(str::trim) {
        None => Ok(false),
        Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => Ok(true),
        Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => Ok(false),
        Some(v) => Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("expected true/false, got {v:?}"),
        )),
    }
}
