//! HTTP client for the Invest OpenAPI.
//!
//! This module provides a type-safe HTTP client for the brokerage REST API.
//! Each call builds an authenticated request, sends it, classifies the
//! response status and decodes the JSON envelope into a typed payload.
//!
//! # Example
//!
//! ```rust,ignore
//! use invest_sdk::client::{ClientConfig, TradingClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TradingClient::new(ClientConfig::sandbox("t.my-token"))?;
//!
//!     let stocks = client.search_instrument_by_ticker("AAPL").await?;
//!     println!("Found {} instruments", stocks.len());
//!
//!     let portfolio = client.portfolio().await?;
//!     println!("Holding {} positions", portfolio.positions.len());
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod response;

pub use config::ClientConfig;
pub use error::{BrokerError, BrokerErrorPayload, ClientError};
pub use http::TradingClient;
pub use response::Envelope;
