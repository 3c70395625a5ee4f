//! Client configuration.
//!
//! The base URL defaults to the public API and can be overridden at
//! construction or through the environment, mainly to point tests at the
//! mock server.

use std::time::Duration;

use tracing::warn;

/// Base URL of the public character API.
pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api";

/// Environment variable overriding `ApiConfig::base_url`.
pub const BASE_URL_ENV: &str = "CHARACTER_API_BASE_URL";

/// Environment variable setting `ApiConfig::timeout`, in whole seconds.
pub const TIMEOUT_ENV: &str = "CHARACTER_API_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    /// Overall per-request timeout. `None` keeps the HTTP client's default.
    pub timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build a config from `CHARACTER_API_BASE_URL` and
    /// `CHARACTER_API_TIMEOUT_SECS`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var(BASE_URL_ENV).ok(),
            std::env::var(TIMEOUT_ENV).ok(),
        )
    }

    fn from_values(base_url: Option<String>, timeout_secs: Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(base_url) = base_url.filter(|s| !s.trim().is_empty()) {
            config.base_url = base_url.trim().to_string();
        }
        if let Some(raw) = timeout_secs {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Some(Duration::from_secs(secs)),
                _ => warn!(value = %raw, "ignoring invalid {TIMEOUT_ENV}"),
            }
        }
        config
    }
}
