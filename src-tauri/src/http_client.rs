//! Shared HTTP Client Module
//!
//! Provides a global, lazy-initialized HTTP client so every call to the
//! classification service reuses the same connection pool. Per-request
//! timeouts are applied by the caller.

use once_cell::sync::Lazy;
use reqwest::Client;
use std::time::Duration;

/// Global HTTP client for the classification service
///
/// - 5s connect timeout so an absent service fails fast
/// - small idle pool, submissions are one at a time
pub static CLASSIFIER_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .connect_timeout(Duration::from_secs(5))
        .pool_max_idle_per_host(2)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_nodelay(true)
        .build()
        .unwrap_or_else(|e| {
            tracing::error!("Failed to build classifier HTTP client: {}. Using defaults.", e);
            Client::new()
        })
});

/// Get the global classifier HTTP client
#[inline]
pub fn classifier_client() -> &'static Client {
    &CLASSIFIER_CLIENT
}
