//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::services::jenkins::{JenkinsClient, JenkinsError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration, the immutable catalog and the Jenkins client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    jenkins: JenkinsClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `catalog` - Product catalog served by the storefront
    ///
    /// # Errors
    ///
    /// Returns an error if the Jenkins HTTP client cannot be built.
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Result<Self, JenkinsError> {
        let jenkins = JenkinsClient::new(&config.jenkins)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                jenkins,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the Jenkins client.
    #[must_use]
    pub fn jenkins(&self) -> &JenkinsClient {
        &self.inner.jenkins
    }
}
