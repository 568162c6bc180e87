//! Environment-driven settings.
//!
//! Binaries call `dotenv().ok()` first, so a local `.env` file works too.
//! Unparseable values are reported and replaced by their defaults.

use std::time::Duration;

use tracing::warn;

pub const DEFAULT_API_URL: &str = "https://nlp-project-backend.vercel.app";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the remote sentiment API (`SENTIMENT_API_URL`)
    pub api_url: String,
    /// Upper bound on every remote request (`SENTIMENT_API_TIMEOUT_SECS`)
    pub timeout: Duration,
    /// Listen address of the HTTP service (`BIND_ADDR`)
    pub bind_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key/value source; `from_env` passes the process env.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = lookup("SENTIMENT_API_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.api_url);

        let timeout = match lookup("SENTIMENT_API_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    warn!(
                        "⚠️ Ignoring SENTIMENT_API_TIMEOUT_SECS={:?}, using {}s",
                        raw, DEFAULT_TIMEOUT_SECS
                    );
                    defaults.timeout
                }
            },
            None => defaults.timeout,
        };

        let bind_addr = lookup("BIND_ADDR")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.bind_addr);

        Self {
            api_url,
            timeout,
            bind_addr,
        }
    }
}
