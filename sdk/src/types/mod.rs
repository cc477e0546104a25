//! Core types for the Invest SDK.
//!
//! This module provides the typed payloads returned by the Invest OpenAPI
//! endpoints and the request bodies sent to them.

pub mod instrument;
pub mod operation;
pub mod order;
pub mod portfolio;
pub mod primitives;

pub use instrument::Instrument;
pub use operation::{Operation, OperationInterval, OperationStatus, OperationTrade, OperationType};
pub use order::{LimitOrderRequest, Order, OrderStatus, OrderType, PlacedLimitOrder};
pub use portfolio::{CurrencyBalance, Portfolio, PositionBalance};
pub use primitives::{Currency, InstrumentType, MoneyAmount};
