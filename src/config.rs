//! Letta connection configuration
//!
//! Reads `LETTA_BASE_URL`, `LETTA_API_TOKEN` and `LETTA_TIMEOUT` (seconds) from
//! the environment, falling back to a local server with a 300 second timeout.

use std::env;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8283";
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

const ENV_BASE_URL: &str = "LETTA_BASE_URL";
const ENV_API_TOKEN: &str = "LETTA_API_TOKEN";
const ENV_TIMEOUT: &str = "LETTA_TIMEOUT";

/// Errors that can occur while loading configuration
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid LETTA_TIMEOUT value '{0}': expected a positive number of seconds")]
    InvalidTimeout(String),

    #[error("Invalid LETTA_BASE_URL: base URL must not be empty")]
    InvalidBaseUrl,
}

/// Configuration for the Letta client connection
#[derive(Debug, Clone, PartialEq)]
pub struct LettaConfig {
    /// Base URL for the Letta server
    pub base_url: String,
    /// API token for authentication, if the server requires one
    pub api_token: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for LettaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl LettaConfig {
    /// Load configuration from `LETTA_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup(ENV_BASE_URL) {
            let trimmed = base_url.trim().trim_end_matches('/');
            if trimmed.is_empty() {
                return Err(ConfigError::InvalidBaseUrl);
            }
            config.base_url = trimmed.to_string();
        }

        config.api_token = lookup(ENV_API_TOKEN)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        if let Some(raw) = lookup(ENV_TIMEOUT) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
            if secs == 0 {
                return Err(ConfigError::InvalidTimeout(raw));
            }
            config.timeout = Duration::from_secs(secs);
        }

        tracing::info!("Letta base URL: {}", config.base_url);
        tracing::debug!(
            "Letta timeout: {}s, token configured: {}",
            config.timeout.as_secs(),
            config.api_token.is_some()
        );

        Ok(config)
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the API token
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
