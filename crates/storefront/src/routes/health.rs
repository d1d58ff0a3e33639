//! Liveness probe.

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies,
/// sessions, or Jenkins.
pub async fn health() -> &'static str {
    "ok"
}
