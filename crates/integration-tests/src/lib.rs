//! Integration tests for the DevOpsHub storefront.
//!
//! Every test runs against a real server bound to an ephemeral loopback port,
//! with Jenkins replaced by [`MockJenkins`]. Nothing outside the process is
//! required.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p devopshub-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    extract::{Request, State},
    http::{StatusCode, header::AUTHORIZATION},
};
use devopshub_storefront::catalog::Catalog;
use devopshub_storefront::config::StorefrontConfig;
use devopshub_storefront::state::AppState;
use tokio::net::TcpListener;

/// Deploy secret configured on every test server.
pub const TEST_DEPLOY_SECRET: &str = "integration-deploy-secret";

/// Jenkins job name configured on every test server.
pub const TEST_JENKINS_JOB: &str = "devopshub-deploy";

/// Jenkins credentials configured on every test server.
pub const TEST_JENKINS_USER: &str = "ci-bot";
pub const TEST_JENKINS_TOKEN: &str = "ci-token";

/// A request received by [`MockJenkins`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
}

#[derive(Clone)]
struct MockState {
    /// `None` accepts the request and never answers.
    reply: Option<StatusCode>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

/// Stand-in Jenkins server that records requests and answers with a fixed
/// status, or not at all.
#[derive(Debug, Clone)]
pub struct MockJenkins {
    addr: SocketAddr,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockJenkins {
    /// Start the mock on an ephemeral port, answering every request with
    /// `status`.
    pub async fn start(status: StatusCode) -> Self {
        Self::start_with(Some(status)).await
    }

    /// Start a mock that records each request and then hangs, so callers
    /// hit their timeout.
    pub async fn start_unresponsive() -> Self {
        Self::start_with(None).await
    }

    async fn start_with(reply: Option<StatusCode>) -> Self {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            reply,
            calls: Arc::clone(&calls),
        };

        let app = Router::new().fallback(record).with_state(state);
        let addr = serve(app).await;

        Self { addr, calls }
    }

    /// Base URL to use as `JENKINS_URL`.
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Requests received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("mock jenkins lock poisoned").clone()
    }
}

async fn record(State(state): State<MockState>, request: Request) -> StatusCode {
    let call = RecordedCall {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        authorization: request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from),
    };
    state
        .calls
        .lock()
        .expect("mock jenkins lock poisoned")
        .push(call);

    match state.reply {
        Some(status) => status,
        None => std::future::pending().await,
    }
}

/// Serve `app` on an ephemeral loopback port and return its address.
async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server error");
    });

    addr
}

/// Jenkins timeout used unless a test picks its own.
pub const TEST_JENKINS_TIMEOUT_SECS: u64 = 5;

/// Storefront configuration pointing at `jenkins_url`.
#[must_use]
pub fn test_config(jenkins_url: &str) -> StorefrontConfig {
    test_config_with_timeout(jenkins_url, TEST_JENKINS_TIMEOUT_SECS)
}

/// Storefront configuration pointing at `jenkins_url` with a Jenkins timeout
/// of `timeout_secs`.
#[must_use]
pub fn test_config_with_timeout(jenkins_url: &str, timeout_secs: u64) -> StorefrontConfig {
    let static_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/../storefront/static");
    let env = HashMap::from([
        ("JENKINS_URL", jenkins_url.to_string()),
        ("JENKINS_JOB", TEST_JENKINS_JOB.to_string()),
        ("JENKINS_USER", TEST_JENKINS_USER.to_string()),
        ("JENKINS_TOKEN", TEST_JENKINS_TOKEN.to_string()),
        ("DEPLOY_SECRET", TEST_DEPLOY_SECRET.to_string()),
        ("JENKINS_TIMEOUT_SECS", timeout_secs.to_string()),
        ("STATIC_DIR", static_dir.to_string()),
    ]);
    StorefrontConfig::from_lookup(|key| env.get(key).cloned())
        .expect("Test configuration must be valid")
}

/// A running storefront.
#[derive(Debug)]
pub struct TestServer {
    pub base_url: String,
}

impl TestServer {
    /// Start the storefront with the demo catalog, triggering builds on
    /// `jenkins_url`.
    pub async fn start(jenkins_url: &str) -> Self {
        Self::start_with_config(test_config(jenkins_url)).await
    }

    /// Start the storefront with a Jenkins timeout of `timeout_secs`.
    pub async fn start_with_timeout(jenkins_url: &str, timeout_secs: u64) -> Self {
        Self::start_with_config(test_config_with_timeout(jenkins_url, timeout_secs)).await
    }

    async fn start_with_config(config: StorefrontConfig) -> Self {
        let state = AppState::new(config, Catalog::demo())
            .expect("Failed to build application state");
        let addr = serve(devopshub_storefront::app(state)).await;

        Self {
            base_url: format!("http://{addr}"),
        }
    }

    /// Absolute URL for `path` on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Browser-like client: keeps cookies and does not follow redirects.
#[must_use]
pub fn browser() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}
