//! Client configuration

use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::{ClientError, ClientResult, HttpClient};

/// Configuration for the ordering client
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | ORDER_API_URL | http://localhost:8080 | Backend base URL |
/// | ORDER_HISTORY_PATH | order_history.redb | Local history database |
/// | REQUEST_TIMEOUT_SECS | 30 | Per-request timeout |
/// | LOG_LEVEL | info | Log level when `RUST_LOG` is unset |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Path of the durable key-value store holding order history
    pub history_path: PathBuf,

    /// Default log level
    pub log_level: String,
}

impl ClientConfig {
    /// Create a new configuration for the given backend
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            history_path: PathBuf::from("order_history.redb"),
            log_level: "info".to_string(),
        }
    }

    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("ORDER_API_URL").unwrap_or(defaults.base_url),
            timeout: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout),
            history_path: std::env::var("ORDER_HISTORY_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.history_path),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the history database path
    pub fn with_history_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_path = path.into();
        self
    }

    /// Set the default log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Reject configurations that cannot produce a working client
    pub fn validate(&self) -> ClientResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(ClientError::Config("base URL is empty".to_string()));
        }
        if self.timeout == 0 {
            return Err(ClientError::Config("timeout must be at least one second".to_string()));
        }
        if let Err(e) = EnvFilter::try_new(&self.log_level) {
            return Err(ClientError::Config(format!("invalid log level {:?}: {}", self.log_level, e)));
        }
        Ok(())
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<HttpClient> {
        HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}
