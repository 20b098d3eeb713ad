//! Client configuration.
//!
//! Defaults suit a backend running locally; every setting can be overridden
//! from the environment or with the builder methods.

use std::path::PathBuf;
use std::time::Duration;

/// Default API base URL (includes the `/api/` prefix).
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api/";

/// Default connect and request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable overriding the API base URL.
pub const ENV_API_URL: &str = "HWASSIST_API_URL";
/// Environment variable overriding both timeouts, in seconds.
pub const ENV_TIMEOUT_SECS: &str = "HWASSIST_TIMEOUT_SECS";
/// Environment variable enabling connection-failure masking.
pub const ENV_MASK_CONNECTION_ERRORS: &str = "HWASSIST_MASK_CONNECTION_ERRORS";
/// Environment variable overriding the credentials file path.
pub const ENV_CREDENTIALS: &str = "HWASSIST_CREDENTIALS";

/// Configuration for the API client.
///
/// # Example
///
/// ```
/// use hwassist::config::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_base_url("http://10.0.2.2:5000/api")
///     .with_mask_connection_failures(false);
/// assert_eq!(config.base_url, "http://10.0.2.2:5000/api/");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API base URL, always ending in `/`
    pub base_url: String,
    /// TCP connect timeout
    pub connect_timeout: Duration,
    /// Overall request timeout
    pub request_timeout: Duration,
    /// Replace connection-level failures with an empty `200 {}` response.
    /// Off by default; the resulting error is then a business error.
    pub mask_connection_failures: bool,
    /// Credentials file; `None` means `~/.hwassist/.credentials.json`
    pub credentials_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: DEFAULT_TIMEOUT,
            request_timeout: DEFAULT_TIMEOUT,
            mask_connection_failures: false,
            credentials_path: None,
        }
    }
}

impl ClientConfig {
    /// Create a new ClientConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by any `HWASSIST_*` variables that are set.
    ///
    /// Malformed numeric or boolean values are ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(ENV_API_URL) {
            if !url.trim().is_empty() {
                config = config.with_base_url(url.trim());
            }
        }

        if let Ok(raw) = std::env::var(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => {
                    config = config
                        .with_connect_timeout(Duration::from_secs(secs))
                        .with_request_timeout(Duration::from_secs(secs));
                }
                _ => tracing::warn!("Ignoring invalid {}={:?}", ENV_TIMEOUT_SECS, raw),
            }
        }

        if let Ok(raw) = std::env::var(ENV_MASK_CONNECTION_ERRORS) {
            match parse_flag(&raw) {
                Some(flag) => config = config.with_mask_connection_failures(flag),
                None => tracing::warn!("Ignoring invalid {}={:?}", ENV_MASK_CONNECTION_ERRORS, raw),
            }
        }

        if let Ok(path) = std::env::var(ENV_CREDENTIALS) {
            if !path.trim().is_empty() {
                config = config.with_credentials_path(path.trim());
            }
        }

        config
    }

    /// Set the base URL. A trailing `/` is added when missing.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let mut url = url.into();
        if !url.ends_with('/') {
            url.push('/');
        }
        self.base_url = url;
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the overall request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set whether connection failures are masked as empty responses.
    pub fn with_mask_connection_failures(mut self, mask: bool) -> Self {
        self.mask_connection_failures = mask;
        self
    }

    /// Set an explicit credentials file path.
    pub fn with_credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = Some(path.into());
        self
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
