//! Client configuration.
//!
//! Provides configuration options for the HTTP client.

use std::fmt;
use std::time::Duration;

use reqwest::header::HeaderValue;

use super::error::ClientError;

/// Default base URL for the API.
pub const DEFAULT_BASE_URL: &str = "https://api-invest.tinkoff.ru/openapi";

/// Base URL of the sandbox environment.
pub const SANDBOX_BASE_URL: &str = "https://api-invest.tinkoff.ru/openapi/sandbox";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Client configuration.
///
/// The configuration is validated once when the client is built and is
/// never mutated afterwards.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL for the API.
    pub base_url: String,

    /// Bearer token used to authenticate every request.
    pub token: String,

    /// Request timeout.
    pub timeout: Duration,

    /// User agent string.
    pub user_agent: String,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientConfig {
    /// Creates a new configuration for the production API with the given
    /// token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: token.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("invest-sdk/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Creates a new configuration for the sandbox API with the given token.
    #[must_use]
    pub fn sandbox(token: impl Into<String>) -> Self {
        Self::new(token).with_base_url(SANDBOX_BASE_URL)
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.base_url.is_empty() {
            return Err(ClientError::InvalidConfig(
                "base_url cannot be empty".to_string(),
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ClientError::InvalidConfig(
                "base_url must start with http:// or https://".to_string(),
            ));
        }

        if self.token.is_empty() {
            return Err(ClientError::InvalidConfig(
                "token cannot be empty".to_string(),
            ));
        }

        if HeaderValue::from_str(&format!("Bearer {}", self.token)).is_err() {
            return Err(ClientError::InvalidConfig(
                "token contains characters not allowed in a header".to_string(),
            ));
        }

        if self.timeout.is_zero() {
            return Err(ClientError::InvalidConfig(
                "timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
