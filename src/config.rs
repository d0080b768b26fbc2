//! Application constants and backend endpoint configuration.

use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "Carelens";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable overriding the collaborator base URL.
pub const ENV_BACKEND_URL: &str = "CARELENS_BACKEND_URL";
/// Environment variable overriding the per-request timeout (seconds).
pub const ENV_BACKEND_TIMEOUT: &str = "CARELENS_BACKEND_TIMEOUT_SECS";

/// Local development address of the recording/email collaborator.
const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";
/// Default per-request timeout. Stop-recording waits on transcription,
/// which dominates every other call.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> String {
    format!("info,{}=debug", env!("CARGO_PKG_NAME"))
}

/// Where and how to reach the recording/transcription + email collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    base_url: String,
    timeout_secs: u64,
}

impl BackendConfig {
    /// Explicit endpoint. Trailing slashes are trimmed so route joins
    /// stay canonical.
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
        }
    }

    /// The local development collaborator with the default timeout.
    pub fn default_local() -> Self {
        Self::new(DEFAULT_BACKEND_URL, DEFAULT_TIMEOUT_SECS)
    }

    /// Read the endpoint from the environment, falling back to the local
    /// default. A malformed timeout value falls back silently: endpoint
    /// configuration must never abort startup.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(ENV_BACKEND_URL).unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        let timeout_secs = std::env::var(ENV_BACKEND_TIMEOUT)
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self::new(&base_url, timeout_secs)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Join a route onto the base URL.
    pub fn route(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
