use order_client::{ClientConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};

use crate::Args;

/// Order form configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | ORDER_ENDPOINT | https://frosty-wood-6558.getsandbox.com:443/dishes | Dish endpoint |
/// | REQUEST_TIMEOUT_SECS | 30 | Request timeout (seconds) |
/// | LOG_LEVEL | info | Log level when `RUST_LOG` is unset |
///
/// A `.env` file in the working directory is loaded first (see `main`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// URL orders are POSTed to
    pub endpoint: String,
    /// Request timeout (seconds)
    pub request_timeout_secs: u64,
    /// trace | debug | info | warn | error
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup; unset or unparsable values
    /// fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            endpoint: lookup("ORDER_ENDPOINT")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ENDPOINT.into()),
            request_timeout_secs: lookup("REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
        }
    }

    /// Command line flags take precedence over the environment
    pub fn with_args(mut self, args: &Args) -> Self {
        if let Some(endpoint) = &args.endpoint {
            self.endpoint = endpoint.clone();
        }
        if let Some(secs) = args.timeout_secs {
            self.request_timeout_secs = secs;
        }
        if let Some(level) = &args.log_level {
            self.log_level = level.clone();
        }
        self
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.endpoint).with_timeout(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
