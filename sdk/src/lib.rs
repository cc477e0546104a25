//! Invest SDK - Rust client library for the Invest OpenAPI brokerage API.
//!
//! This crate provides typed access to the REST trading API: instrument
//! lookup, portfolio retrieval, order placement and cancellation, and the
//! operation history.
//!
//! # Client
//!
//! - [`TradingClient`]: Authenticated HTTP client, one method per endpoint
//! - [`ClientConfig`]: Immutable client configuration (token, base URL, timeout)
//! - [`ClientError`]: Transport, classification and decoding failures
//! - [`BrokerError`]: Structured error reported by the broker
//!
//! # Types
//!
//! - [`Instrument`]: Tradable instrument
//! - [`Portfolio`], [`PositionBalance`], [`CurrencyBalance`]: Holdings
//! - [`Order`], [`PlacedLimitOrder`]: Orders
//! - [`Operation`]: Operation history entry
//!
//! # Example
//!
//! ```rust
//! use invest_sdk::{ClientConfig, OperationInterval, OperationType};
//!
//! let config = ClientConfig::sandbox("t.my-token");
//! assert!(config.validate().is_ok());
//!
//! let interval: OperationInterval = "7days".parse().unwrap();
//! assert_eq!(interval, OperationInterval::Week);
//! assert!(OperationType::Buy.is_trade());
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::{BrokerError, ClientConfig, ClientError, TradingClient};
pub use error::SdkError;
pub use types::{
    Currency, CurrencyBalance, Instrument, InstrumentType, LimitOrderRequest, MoneyAmount,
    Operation, OperationInterval, OperationStatus, OperationTrade, OperationType, Order,
    OrderStatus, OrderType, PlacedLimitOrder, Portfolio, PositionBalance,
};
