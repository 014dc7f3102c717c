//! # Configuration
//!
//! Environment-driven runtime configuration. Binaries call `dotenvy::dotenv()`
//! before `Config::from_env()` so a local `.env` file can supply these values.

use anyhow::{Context, Result};
use std::env;

/// Default backend address, matching the server's default listen port.
const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";

/// Default per-request timeout. Persona replies are LLM-generated and can
/// take a while, so this is deliberately generous.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Runtime configuration for the client.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the band-chat backend (no trailing slash)
    pub backend_url: String,
    /// Default log filter for env_logger
    pub log_level: String,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables, applying defaults for
    /// anything unset.
    ///
    /// - `BACKEND_URL` - backend base URL (default `http://localhost:8080`)
    /// - `LOG_LEVEL` - log filter (default `info`)
    /// - `REQUEST_TIMEOUT_SECS` - HTTP timeout in seconds (default `120`)
    pub fn from_env() -> Result<Self> {
        let backend_url = env::var("BACKEND_URL")
            .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let request_timeout_secs = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("invalid REQUEST_TIMEOUT_SECS value '{raw}'"))?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Config {
            backend_url,
            log_level,
            request_timeout_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test because the cases share process-global environment variables
    // and cargo runs tests in parallel.
    #[test]
    fn test_from_env() {
        env::remove_var("BACKEND_URL");
        env::remove_var("LOG_LEVEL");
        env::remove_var("REQUEST_TIMEOUT_SECS");

        let config = Config::from_env().unwrap();
        assert_eq!(config.backend_url, "http://localhost:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.request_timeout_secs, 120);

        // Trailing slash on the backend URL is stripped
        env::set_var("BACKEND_URL", "http://example.com:9000/");
        let config = Config::from_env().unwrap();
        assert_eq!(config.backend_url, "http://example.com:9000");
        env::remove_var("BACKEND_URL");

        // A malformed timeout is an error, not a silent default
        env::set_var("REQUEST_TIMEOUT_SECS", "not-a-number");
        assert!(Config::from_env().is_err());
        env::remove_var("REQUEST_TIMEOUT_SECS");
    }
}
