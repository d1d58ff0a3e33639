//! Session middleware configuration.
//!
//! Sessions are kept in process memory using a `moka` cache as the
//! tower-sessions store. Entries are evicted after [`SESSION_EXPIRY_SECONDS`]
//! of inactivity or when the cache exceeds [`SESSION_MAX_CAPACITY`] records,
//! so abandoned carts do not accumulate for the life of the process.
//! Nothing survives a restart.

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tower_sessions::cookie::time::{self, OffsetDateTime};
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::{self, SessionStore};
use tower_sessions::{Expiry, SessionManagerLayer};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "devopshub_session";

/// Session expiry time in seconds (7 days).
pub const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Upper bound on live session records.
pub const SESSION_MAX_CAPACITY: u64 = 100_000;

/// In-memory session store backed by a `moka` cache.
///
/// Cheap to clone; clones share the same cache.
#[derive(Clone)]
pub struct MokaSessionStore {
    cache: Cache<Id, Record>,
}

impl std::fmt::Debug for MokaSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaSessionStore")
            .field("entry_count", &self.cache.entry_count())
            .finish()
    }
}

impl MokaSessionStore {
    /// Create a store that evicts records idle for longer than `idle`.
    #[must_use]
    pub fn new(max_capacity: u64, idle: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_idle(idle)
            .build();
        Self { cache }
    }
}

impl Default for MokaSessionStore {
    fn default() -> Self {
        Self::new(
            SESSION_MAX_CAPACITY,
            Duration::from_secs(SESSION_EXPIRY_SECONDS.unsigned_abs()),
        )
    }
}

#[async_trait]
impl SessionStore for MokaSessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        // Regenerate on the (astronomically unlikely) id collision.
        while self.cache.contains_key(&record.id) {
            record.id = Id::default();
        }
        self.cache.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.cache.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let Some(record) = self.cache.get(session_id).await else {
            return Ok(None);
        };

        if record.expiry_date <= OffsetDateTime::now_utc() {
            self.cache.invalidate(session_id).await;
            return Ok(None);
        }

        Ok(Some(record))
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.cache.invalidate(session_id).await;
        Ok(())
    }
}

/// Create the session layer with the in-memory store.
///
/// # Arguments
///
/// * `store` - Session store shared by all requests
/// * `config` - Storefront configuration (for the cookie `Secure` flag)
#[must_use]
pub fn create_session_layer(
    store: MokaSessionStore,
    config: &StorefrontConfig,
) -> SessionManagerLayer<MokaSessionStore> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(time::Duration::seconds(
            SESSION_EXPIRY_SECONDS,
        )))
        .with_secure(config.secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
