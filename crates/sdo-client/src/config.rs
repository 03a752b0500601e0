//! Client configuration.
//!
//! Defaults can be overridden from the environment:
//! - `SDO_API_BASE_URL`
//! - `SDO_API_TIMEOUT_SECS`
//! - `SDO_API_CONNECT_TIMEOUT_SECS`
//! - `SDO_API_USER_AGENT`

use std::time::Duration;

use sdo_common::DEFAULT_BASE_URL;
use tracing::warn;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Settings for the HTTP transport and URL builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root, e.g. `http://dmlab.cs.gsu.edu/dmlabapi`
    pub base_url: String,
    /// Total time allowed for one request
    pub request_timeout: Duration,
    /// Time allowed to establish the connection
    pub connect_timeout: Duration,
    pub user_agent: String,
    /// Honour `HTTP_PROXY` and friends from the environment
    pub use_env_proxy: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            user_agent: concat!("sdo-client/", env!("CARGO_PKG_VERSION")).to_string(),
            use_env_proxy: true,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let secs = |key: &str, default: Duration| -> Duration {
            match lookup(key) {
                Some(raw) => match raw.trim().parse::<u64>() {
                    Ok(secs) if secs > 0 => Duration::from_secs(secs),
                    _ => {
                        warn!(key = key, value = %raw, "Ignoring invalid timeout, using default");
                        default
                    }
                },
                None => default,
            }
        };

        Self {
            base_url: lookup("SDO_API_BASE_URL")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.base_url),
            request_timeout: secs("SDO_API_TIMEOUT_SECS", defaults.request_timeout),
            connect_timeout: secs("SDO_API_CONNECT_TIMEOUT_SECS", defaults.connect_timeout),
            user_agent: lookup("SDO_API_USER_AGENT").unwrap_or(defaults.user_agent),
            use_env_proxy: defaults.use_env_proxy,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Connect directly, ignoring proxy environment variables.
    pub fn without_proxy(mut self) -> Self {
        self.use_env_proxy = false;
        self
    }
}
