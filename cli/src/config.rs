//! CLI configuration.
//!
//! Settings are read from the environment:
//!
//! - `INVEST_API_TOKEN` (required): bearer token
//! - `INVEST_API_URL`: base URL, overrides `INVEST_API_SANDBOX`
//! - `INVEST_API_SANDBOX`: `1`/`true` to target the sandbox
//! - `INVEST_API_TIMEOUT_SECS`: request timeout in seconds

use std::env;
use std::time::Duration;

use invest_sdk::client::config::{DEFAULT_BASE_URL, SANDBOX_BASE_URL};
use invest_sdk::ClientConfig;

/// Token variable.
pub const TOKEN_VAR: &str = "INVEST_API_TOKEN";
/// Base URL variable.
pub const URL_VAR: &str = "INVEST_API_URL";
/// Sandbox switch variable.
pub const SANDBOX_VAR: &str = "INVEST_API_SANDBOX";
/// Timeout variable.
pub const TIMEOUT_VAR: &str = "INVEST_API_TIMEOUT_SECS";

/// Settings for the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Bearer token.
    pub token: String,

    /// Base URL of the API.
    pub base_url: String,

    /// Request timeout, if overridden.
    pub timeout: Option<Duration>,
}

impl Settings {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is missing or a value is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through the given variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is missing or a value is malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup(TOKEN_VAR)
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let sandbox = match lookup(SANDBOX_VAR) {
            Some(value) => parse_flag(&value)?,
            None => false,
        };

        let base_url = lookup(URL_VAR).unwrap_or_else(|| {
            if sandbox {
                SANDBOX_BASE_URL.to_string()
            } else {
                DEFAULT_BASE_URL.to_string()
            }
        });

        let timeout = lookup(TIMEOUT_VAR)
            .map(|value| match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
                _ => Err(ConfigError::InvalidTimeout(value)),
            })
            .transpose()?;

        Ok(Self {
            token: token.trim().to_string(),
            base_url,
            timeout,
        })
    }

    /// Builds the SDK client configuration.
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(self.token.clone()).with_base_url(self.base_url.clone());
        match self.timeout {
            Some(timeout) => config.with_timeout(timeout),
            None => config,
        }
    }
}

fn parse_flag(value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "" | "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidFlag(value.to_string())),
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Token not set.
    #[error("INVEST_API_TOKEN must be set")]
    MissingToken,

    /// Invalid timeout.
    #[error("INVEST_API_TIMEOUT_SECS must be a positive number of seconds, got {0:?}")]
    InvalidTimeout(String),

    /// Invalid boolean flag.
    #[error("INVEST_API_SANDBOX must be a boolean, got {0:?}")]
    InvalidFlag(String),
}
