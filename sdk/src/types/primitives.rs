//! Primitive types for the Invest SDK.
//!
//! Provides currencies, money amounts and instrument kinds shared by the
//! market, portfolio and order types.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::SdkError;

/// Settlement currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Russian ruble.
    Rub,
    /// US dollar.
    Usd,
    /// Euro.
    Eur,
    /// Pound sterling.
    Gbp,
    /// Hong Kong dollar.
    Hkd,
    /// Swiss franc.
    Chf,
    /// Japanese yen.
    Jpy,
    /// Chinese yuan.
    Cny,
    /// Turkish lira.
    Try,
}

impl Currency {
    /// Returns the ISO 4217 code as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rub => "RUB",
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Hkd => "HKD",
            Self::Chf => "CHF",
            Self::Jpy => "JPY",
            Self::Cny => "CNY",
            Self::Try => "TRY",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "RUB" => Ok(Self::Rub),
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            "GBP" => Ok(Self::Gbp),
            "HKD" => Ok(Self::Hkd),
            "CHF" => Ok(Self::Chf),
            "JPY" => Ok(Self::Jpy),
            "CNY" => Ok(Self::Cny),
            "TRY" => Ok(Self::Try),
            _ => Err(SdkError::unknown("currency", s)),
        }
    }
}

/// An amount of money in a given currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyAmount {
    /// Currency of the amount.
    pub currency: Currency,

    /// Amount value.
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
}

impl MoneyAmount {
    /// Creates a new money amount.
    #[must_use]
    pub const fn new(currency: Currency, value: Decimal) -> Self {
        Self { currency, value }
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.value.is_sign_negative() && !self.value.is_zero()
    }
}

impl fmt::Display for MoneyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.currency)
    }
}

/// Kind of a tradable instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstrumentType {
    /// Share.
    Stock,
    /// Currency pair traded on the exchange.
    Currency,
    /// Bond.
    Bond,
    /// Exchange-traded fund.
    Etf,
}

impl InstrumentType {
    /// Returns the wire name of the instrument type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Stock => "Stock",
            Self::Currency => "Currency",
            Self::Bond => "Bond",
            Self::Etf => "Etf",
        }
    }
}

impl fmt::Display for InstrumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstrumentType {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stock" => Ok(Self::Stock),
            "currency" => Ok(Self::Currency),
            "bond" => Ok(Self::Bond),
            "etf" => Ok(Self::Etf),
            _ => Err(SdkError::unknown("instrument type", s)),
        }
    }
}
