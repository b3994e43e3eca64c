//! Client configuration.
//!
//! # Environment Variables
//!
//! - `FROSTBITES_API_URL` - Base URL of the storefront API (default: `http://localhost:3000`)
//! - `FROSTBITES_API_TIMEOUT_SECS` - Per-request timeout in seconds (default: 10)

use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid API URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Where and how the client reaches the storefront API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Build a config for the given base URL with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the URL cannot be parsed or is
    /// not `http(s)`.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let base_url = std::env::var("FROSTBITES_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout_secs = match std::env::var("FROSTBITES_API_TIMEOUT_SECS") {
            Ok(value) => value.parse::<u64>().map_err(|e| {
                ConfigError::InvalidValue("FROSTBITES_API_TIMEOUT_SECS".to_string(), e.to_string())
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url: parse_base_url(&base_url)?,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Absolute URL of an API path such as `/auth/verify`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be joined onto the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path.trim_start_matches('/'))
    }
}

/// Parse the base URL, keeping any path prefix so joins stay beneath it.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };

    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
