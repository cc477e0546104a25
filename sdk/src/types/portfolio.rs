//! Portfolio types for the Invest SDK.
//!
//! Provides security positions, currency balances and the combined
//! portfolio view.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::primitives::{Currency, InstrumentType, MoneyAmount};

/// A security position held in the portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionBalance {
    /// Instrument FIGI.
    pub figi: String,

    /// Exchange ticker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,

    /// ISIN code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isin: Option<String>,

    /// Instrument kind.
    pub instrument_type: InstrumentType,

    /// Units held.
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,

    /// Units locked in open orders.
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub blocked: Option<Decimal>,

    /// Lots held.
    pub lots: i64,

    /// Unrealized profit or loss.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_yield: Option<MoneyAmount>,

    /// Average purchase price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_position_price: Option<MoneyAmount>,

    /// Average purchase price excluding accrued coupon income.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_position_price_no_nkd: Option<MoneyAmount>,

    /// Instrument name.
    pub name: String,
}

impl PositionBalance {
    /// Returns the units not locked in open orders.
    #[must_use]
    pub fn available(&self) -> Decimal {
        self.balance - self.blocked.unwrap_or_default()
    }

    /// Returns true if the position shows an unrealized loss.
    #[must_use]
    pub fn is_losing(&self) -> bool {
        self.expected_yield
            .as_ref()
            .is_some_and(MoneyAmount::is_negative)
    }
}

impl fmt::Display for PositionBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({} lots)",
            self.ticker.as_deref().unwrap_or(&self.figi),
            self.balance,
            self.lots
        )
    }
}

/// Free cash in one currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyBalance {
    /// Currency of the balance.
    pub currency: Currency,

    /// Total balance.
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,

    /// Funds locked in open orders.
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub blocked: Option<Decimal>,
}

impl CurrencyBalance {
    /// Returns the funds not locked in open orders.
    #[must_use]
    pub fn available(&self) -> Decimal {
        self.balance - self.blocked.unwrap_or_default()
    }
}

impl fmt::Display for CurrencyBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.balance, self.currency)
    }
}

/// Security positions and currency balances of the account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    /// Security positions.
    pub positions: Vec<PositionBalance>,

    /// Currency balances.
    pub currencies: Vec<CurrencyBalance>,
}

impl Portfolio {
    /// Returns the position for the given FIGI, if held.
    #[must_use]
    pub fn position(&self, figi: &str) -> Option<&PositionBalance> {
        self.positions.iter().find(|p| p.figi == figi)
    }

    /// Returns the balance in the given currency, if any.
    #[must_use]
    pub fn currency(&self, currency: Currency) -> Option<&CurrencyBalance> {
        self.currencies.iter().find(|c| c.currency == currency)
    }

    /// Returns true if the portfolio holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.currencies.is_empty()
    }
}
