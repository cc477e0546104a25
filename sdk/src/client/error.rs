//! Client error types.
//!
//! Provides error types for HTTP client operations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SdkError;

/// Broker error code reported when the account cannot cover an order.
pub const NOT_ENOUGH_BALANCE: &str = "NOT_ENOUGH_BALANCE";

/// Structured error returned by the broker on a failed request.
///
/// Wire format:
/// `{"trackingId": "...", "status": "Error", "payload": {"message": "...", "code": "..."}}`
///
/// Missing fields decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BrokerError {
    /// Request tracking ID, useful when contacting support.
    pub tracking_id: String,

    /// Response status, usually `Error`.
    pub status: String,

    /// Error details.
    pub payload: BrokerErrorPayload,
}

/// Details of a [`BrokerError`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerErrorPayload {
    /// Human-readable message.
    pub message: String,

    /// Machine-readable error code.
    pub code: String,
}

impl BrokerError {
    /// Returns the machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.payload.code
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.payload.message
    }

    /// Returns true if the account does not have enough funds for the
    /// request.
    #[must_use]
    pub fn is_not_enough_balance(&self) -> bool {
        self.payload.code == NOT_ENOUGH_BALANCE
    }
}

impl fmt::Display for BrokerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "broker error [{}]: {} (status={}, tracking_id={})",
            self.payload.code, self.payload.message, self.status, self.tracking_id
        )
    }
}

impl std::error::Error for BrokerError {}

/// Client errors.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid request parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] SdkError),

    /// The request URL could not be built.
    #[error("can't create http request to {url}: {source}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// Parse failure.
        source: url::ParseError,
    },

    /// The request body could not be serialized.
    #[error("can't marshal request body to {url}: {source}")]
    Serialization {
        /// Target URL.
        url: String,
        /// Serialization failure.
        source: serde_json::Error,
    },

    /// The request could not be sent or the response body could not be read.
    #[error("can't do request to {url}: {source}")]
    Transport {
        /// Target URL.
        url: String,
        /// Underlying transport failure.
        source: reqwest::Error,
    },

    /// Resource not found (404).
    #[error("not found")]
    NotFound,

    /// The broker rejected the request with a structured error.
    #[error(transparent)]
    Broker(#[from] BrokerError),

    /// Non-success response whose body is not a broker error.
    #[error("bad response to {url} code={status}, body={body}")]
    UnexpectedStatus {
        /// Target URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// A successful response did not match the expected payload shape.
    #[error("can't unmarshal response to {url}: {source}, body={body}")]
    Decode {
        /// Target URL.
        url: String,
        /// Raw response body.
        body: String,
        /// Decoding failure.
        source: serde_json::Error,
    },
}

impl ClientError {
    /// Returns true if the resource was not found.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Returns true if the request timed out.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport { source, .. } if source.is_timeout())
    }

    /// Returns the structured broker error, if any.
    #[must_use]
    pub fn broker_error(&self) -> Option<&BrokerError> {
        match self {
            Self::Broker(err) => Some(err),
            _ => None,
        }
    }

    /// Returns true if the broker reported insufficient funds.
    #[must_use]
    pub fn is_not_enough_balance(&self) -> bool {
        self.broker_error()
            .is_some_and(BrokerError::is_not_enough_balance)
    }
}
