//! Order types for the Invest SDK.
//!
//! Provides order-related types including order type, status, the limit
//! order request body and placement results.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::operation::OperationType;
use super::primitives::MoneyAmount;
use crate::error::SdkError;

/// Order type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    /// Limit order.
    Limit,
    /// Market order.
    Market,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limit => write!(f, "Limit"),
            Self::Market => write!(f, "Market"),
        }
    }
}

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Accepted by the broker.
    New,
    /// Partially filled.
    PartiallyFill,
    /// Completely filled.
    Fill,
    /// Cancelled.
    Cancelled,
    /// Replaced by another order.
    Replaced,
    /// Cancellation requested.
    PendingCancel,
    /// Rejected.
    Rejected,
    /// Replacement requested.
    PendingReplace,
    /// Awaiting acceptance.
    PendingNew,
}

impl OrderStatus {
    /// Returns true if the order may still be filled.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(
            self,
            Self::New | Self::PartiallyFill | Self::PendingNew | Self::PendingReplace
        )
    }

    /// Returns true if the order is terminal (no longer active).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Fill | Self::Cancelled | Self::Replaced | Self::Rejected
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::New => "New",
            Self::PartiallyFill => "PartiallyFill",
            Self::Fill => "Fill",
            Self::Cancelled => "Cancelled",
            Self::Replaced => "Replaced",
            Self::PendingCancel => "PendingCancel",
            Self::Rejected => "Rejected",
            Self::PendingReplace => "PendingReplace",
            Self::PendingNew => "PendingNew",
        };
        f.write_str(name)
    }
}

/// Body of a limit order placement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitOrderRequest {
    /// Number of lots.
    pub lots: u32,

    /// Order side, `Buy` or `Sell`.
    pub operation: OperationType,

    /// Limit price.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl LimitOrderRequest {
    /// Creates a new limit order request.
    ///
    /// # Errors
    ///
    /// Returns an error if `lots` is zero or `price` is not positive.
    pub fn new(lots: u32, operation: OperationType, price: Decimal) -> Result<Self, SdkError> {
        if lots == 0 {
            return Err(SdkError::InvalidLots("lots must be positive".to_string()));
        }

        if price <= Decimal::ZERO {
            return Err(SdkError::InvalidPrice(format!(
                "price must be positive, got {}",
                price
            )));
        }

        Ok(Self {
            lots,
            operation,
            price,
        })
    }
}

/// An active order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order ID.
    #[serde(rename = "orderId")]
    pub id: String,

    /// Instrument FIGI.
    pub figi: String,

    /// Order side.
    pub operation: OperationType,

    /// Order status.
    pub status: OrderStatus,

    /// Lots requested.
    pub requested_lots: u32,

    /// Lots executed so far.
    pub executed_lots: u32,

    /// Order type.
    #[serde(rename = "type")]
    pub order_type: OrderType,

    /// Limit price.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl Order {
    /// Returns the lots still waiting to be executed.
    #[must_use]
    pub fn remaining_lots(&self) -> u32 {
        self.requested_lots.saturating_sub(self.executed_lots)
    }

    /// Returns true if the order is fully filled.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.remaining_lots() == 0
    }

    /// Returns true if the order is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Result of placing a limit order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedLimitOrder {
    /// Order ID.
    #[serde(rename = "orderId")]
    pub id: String,

    /// Order side.
    pub operation: OperationType,

    /// Order status.
    pub status: OrderStatus,

    /// Reason given by the broker when the order is rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reject_reason: Option<String>,

    /// Lots requested.
    pub requested_lots: u32,

    /// Lots executed immediately.
    pub executed_lots: u32,

    /// Commission charged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission: Option<MoneyAmount>,
}

impl PlacedLimitOrder {
    /// Returns true if the broker rejected the order.
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        self.status == OrderStatus::Rejected
    }
}
