//! Operation types for the Invest SDK.
//!
//! Provides the operation history records and the enumerations shared with
//! order placement.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::primitives::{Currency, InstrumentType, MoneyAmount};
use crate::error::SdkError;

/// Operation type.
///
/// `Buy` and `Sell` double as the side of a limit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationType {
    /// Purchase of securities.
    Buy,
    /// Purchase of securities paid from a card.
    BuyCard,
    /// Sale of securities.
    Sell,
    /// Broker commission.
    BrokerCommission,
    /// Exchange commission.
    ExchangeCommission,
    /// Service commission.
    ServiceCommission,
    /// Margin commission.
    MarginCommission,
    /// Other commission.
    OtherCommission,
    /// Funds deposited.
    PayIn,
    /// Funds withdrawn.
    PayOut,
    /// Tax.
    Tax,
    /// Tax on income.
    TaxLucre,
    /// Tax on dividends.
    TaxDividend,
    /// Tax on coupons.
    TaxCoupon,
    /// Tax refund.
    TaxBack,
    /// Bond repayment.
    Repayment,
    /// Partial bond repayment.
    PartRepayment,
    /// Coupon payment.
    Coupon,
    /// Dividend payment.
    Dividend,
    /// Securities transferred in.
    SecurityIn,
    /// Securities transferred out.
    SecurityOut,
}

impl OperationType {
    /// Returns the wire name of the operation type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "Buy",
            Self::BuyCard => "BuyCard",
            Self::Sell => "Sell",
            Self::BrokerCommission => "BrokerCommission",
            Self::ExchangeCommission => "ExchangeCommission",
            Self::ServiceCommission => "ServiceCommission",
            Self::MarginCommission => "MarginCommission",
            Self::OtherCommission => "OtherCommission",
            Self::PayIn => "PayIn",
            Self::PayOut => "PayOut",
            Self::Tax => "Tax",
            Self::TaxLucre => "TaxLucre",
            Self::TaxDividend => "TaxDividend",
            Self::TaxCoupon => "TaxCoupon",
            Self::TaxBack => "TaxBack",
            Self::Repayment => "Repayment",
            Self::PartRepayment => "PartRepayment",
            Self::Coupon => "Coupon",
            Self::Dividend => "Dividend",
            Self::SecurityIn => "SecurityIn",
            Self::SecurityOut => "SecurityOut",
        }
    }

    /// Returns true for purchases and sales of securities.
    #[must_use]
    pub const fn is_trade(&self) -> bool {
        matches!(self, Self::Buy | Self::BuyCard | Self::Sell)
    }

    /// Returns true for any kind of commission.
    #[must_use]
    pub const fn is_commission(&self) -> bool {
        matches!(
            self,
            Self::BrokerCommission
                | Self::ExchangeCommission
                | Self::ServiceCommission
                | Self::MarginCommission
                | Self::OtherCommission
        )
    }

    /// Returns true for any kind of tax.
    #[must_use]
    pub const fn is_tax(&self) -> bool {
        matches!(
            self,
            Self::Tax | Self::TaxLucre | Self::TaxDividend | Self::TaxCoupon | Self::TaxBack
        )
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationType {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Buy" => Ok(Self::Buy),
            "BuyCard" => Ok(Self::BuyCard),
            "Sell" => Ok(Self::Sell),
            "BrokerCommission" => Ok(Self::BrokerCommission),
            "ExchangeCommission" => Ok(Self::ExchangeCommission),
            "ServiceCommission" => Ok(Self::ServiceCommission),
            "MarginCommission" => Ok(Self::MarginCommission),
            "OtherCommission" => Ok(Self::OtherCommission),
            "PayIn" => Ok(Self::PayIn),
            "PayOut" => Ok(Self::PayOut),
            "Tax" => Ok(Self::Tax),
            "TaxLucre" => Ok(Self::TaxLucre),
            "TaxDividend" => Ok(Self::TaxDividend),
            "TaxCoupon" => Ok(Self::TaxCoupon),
            "TaxBack" => Ok(Self::TaxBack),
            "Repayment" => Ok(Self::Repayment),
            "PartRepayment" => Ok(Self::PartRepayment),
            "Coupon" => Ok(Self::Coupon),
            "Dividend" => Ok(Self::Dividend),
            "SecurityIn" => Ok(Self::SecurityIn),
            "SecurityOut" => Ok(Self::SecurityOut),
            _ => Err(SdkError::unknown("operation type", s)),
        }
    }
}

/// Operation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationStatus {
    /// Operation completed.
    Done,
    /// Operation declined.
    Decline,
    /// Operation in progress.
    Progress,
}

impl OperationStatus {
    /// Returns true if the operation completed.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Done => write!(f, "Done"),
            Self::Decline => write!(f, "Decline"),
            Self::Progress => write!(f, "Progress"),
        }
    }
}

/// Look-back interval for the operation history query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationInterval {
    /// One day.
    #[serde(rename = "1day")]
    Day,
    /// Seven days.
    #[serde(rename = "7days")]
    Week,
    /// Fourteen days.
    #[serde(rename = "14days")]
    TwoWeeks,
    /// Thirty days.
    #[serde(rename = "30days")]
    Month,
}

impl OperationInterval {
    /// Returns the query parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "1day",
            Self::Week => "7days",
            Self::TwoWeeks => "14days",
            Self::Month => "30days",
        }
    }

    /// Returns the length of the interval.
    #[must_use]
    pub fn duration(&self) -> Duration {
        match self {
            Self::Day => Duration::days(1),
            Self::Week => Duration::days(7),
            Self::TwoWeeks => Duration::days(14),
            Self::Month => Duration::days(30),
        }
    }
}

impl fmt::Display for OperationInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationInterval {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1day" => Ok(Self::Day),
            "7days" => Ok(Self::Week),
            "14days" => Ok(Self::TwoWeeks),
            "30days" => Ok(Self::Month),
            _ => Err(SdkError::unknown("operation interval", s)),
        }
    }
}

/// A single trade that contributed to an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationTrade {
    /// Trade ID.
    pub trade_id: String,

    /// Execution time.
    #[serde(rename = "date")]
    pub date_time: DateTime<Utc>,

    /// Execution price.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Executed quantity in units.
    pub quantity: i64,
}

/// An entry of the operation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Operation ID.
    pub id: String,

    /// Operation status.
    pub status: OperationStatus,

    /// Trades that filled the operation.
    #[serde(default)]
    pub trades: Vec<OperationTrade>,

    /// Commission charged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission: Option<MoneyAmount>,

    /// Payment currency.
    pub currency: Currency,

    /// Payment amount (negative for outflows).
    #[serde(with = "rust_decimal::serde::float")]
    pub payment: Decimal,

    /// Average price.
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,

    /// Quantity in units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,

    /// Instrument FIGI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub figi: Option<String>,

    /// Instrument kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument_type: Option<InstrumentType>,

    /// Whether the operation was caused by a margin call.
    #[serde(default)]
    pub is_margin_call: bool,

    /// Operation time.
    #[serde(rename = "date")]
    pub date_time: DateTime<Utc>,

    /// Operation type.
    pub operation_type: OperationType,
}

impl Operation {
    /// Returns the quantity executed across all trades.
    #[must_use]
    pub fn executed_quantity(&self) -> i64 {
        self.trades
            .iter()
            .fold(0i64, |total, t| total.saturating_add(t.quantity))
    }

    /// Returns true if the operation moved securities or money for a trade.
    #[must_use]
    pub fn is_trade(&self) -> bool {
        self.operation_type.is_trade()
    }
}
