//! Response classification and envelope decoding.
//!
//! Every successful response carries its data in a `{"payload": ...}`
//! envelope. List endpoints nest the array one level deeper, e.g.
//! `{"payload": {"instruments": [...]}}`.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::{BrokerError, ClientError};
use crate::types::{CurrencyBalance, Instrument, PositionBalance};

/// Success envelope shared by all endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Wrapped data.
    pub payload: T,
}

impl<T> Envelope<T> {
    /// Wraps a payload.
    pub fn new(payload: T) -> Self {
        Self { payload }
    }

    /// Unwraps the payload.
    pub fn into_payload(self) -> T {
        self.payload
    }
}

/// Payload of the market endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct InstrumentList {
    pub(crate) instruments: Vec<Instrument>,
}

/// Payload of the portfolio endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct PositionList {
    pub(crate) positions: Vec<PositionBalance>,
}

/// Payload of the portfolio currencies endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct CurrencyList {
    pub(crate) currencies: Vec<CurrencyBalance>,
}

/// Classifies a response by status code.
///
/// Returns `Ok(())` only for `200 OK`, in which case the body is ready to be
/// decoded. A `404` always maps to [`ClientError::NotFound`] without looking
/// at the body. Any other status is reported as a [`BrokerError`] when the
/// body is a JSON object, with absent fields left empty, and as
/// [`ClientError::UnexpectedStatus`] otherwise.
///
/// # Errors
///
/// Returns the classified error for any status other than `200 OK`.
pub fn classify(url: &str, status: StatusCode, body: &[u8]) -> Result<(), ClientError> {
    match status {
        StatusCode::OK => Ok(()),
        StatusCode::NOT_FOUND => Err(ClientError::NotFound),
        _ => match parse_broker_error(body) {
            Some(broker_error) => {
                warn!(
                    %url,
                    status = status.as_u16(),
                    code = %broker_error.code(),
                    tracking_id = %broker_error.tracking_id,
                    "broker rejected request"
                );
                Err(ClientError::Broker(broker_error))
            }
            None => Err(ClientError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
                body: String::from_utf8_lossy(body).into_owned(),
            }),
        },
    }
}

/// Parses an error body as a [`BrokerError`] if it is a JSON object.
fn parse_broker_error(body: &[u8]) -> Option<BrokerError> {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .filter(serde_json::Value::is_object)
        .and_then(|value| serde_json::from_value(value).ok())
}

/// Decodes an envelope and returns its payload.
///
/// # Errors
///
/// Returns [`ClientError::Decode`] with the URL and the raw body if the body
/// does not match `{"payload": T}`.
pub fn decode_payload<T: DeserializeOwned>(url: &str, body: &[u8]) -> Result<T, ClientError> {
    serde_json::from_slice::<Envelope<T>>(body)
        .map(Envelope::into_payload)
        .map_err(|source| ClientError::Decode {
            url: url.to_string(),
            body: String::from_utf8_lossy(body).into_owned(),
            source,
        })
}
