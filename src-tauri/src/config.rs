//! Runtime configuration for the detection backend
//!
//! The service location comes from the environment (a `.env` file is loaded
//! in `run()`). The request timeout is fixed.

use std::time::Duration;

/// Used when no service URL is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Prediction endpoint, relative to the base URL
pub const PREDICT_PATH: &str = "/api/predict";

/// Health endpoint, relative to the base URL
pub const HEALTH_PATH: &str = "/api/health";

/// Upper bound on one classification round trip
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Checked in order, first non-empty value wins
const API_URL_VARS: [&str; 3] = ["FAKEGUARD_API_URL", "VITE_API_URL", "REACT_APP_API_URL"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorConfig {
    /// Base URL of the classification service, without trailing slash
    pub base_url: String,
    timeout: Duration,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_API_URL)
    }
}

impl DetectorConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read the service URL from the environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        API_URL_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.trim().is_empty())
            .map(Self::with_base_url)
            .unwrap_or_default()
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn request_timeout(&self) -> Duration {
        self.timeout
    }
}
