//! Instrument types for the Invest SDK.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::primitives::{Currency, InstrumentType};

/// A tradable instrument as returned by the market search endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    /// Financial Instrument Global Identifier.
    pub figi: String,

    /// Exchange ticker.
    pub ticker: String,

    /// ISIN code, absent for currencies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isin: Option<String>,

    /// Human-readable instrument name.
    pub name: String,

    /// Minimum price step.
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_price_increment: Option<Decimal>,

    /// Number of units in one lot.
    pub lot: u32,

    /// Trading currency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,

    /// Instrument kind.
    #[serde(rename = "type")]
    pub instrument_type: InstrumentType,
}

impl Instrument {
    /// Rounds a price down to the nearest valid price step.
    ///
    /// Returns the price unchanged when the instrument has no price step or
    /// the price is too large to align.
    #[must_use]
    pub fn align_price(&self, price: Decimal) -> Decimal {
        match self.min_price_increment {
            Some(step) if !step.is_zero() => price
                .checked_div(step)
                .and_then(|steps| steps.floor().checked_mul(step))
                .unwrap_or(price),
            _ => price,
        }
    }

    /// Returns the number of units for the given number of lots.
    #[must_use]
    pub fn units(&self, lots: u32) -> u64 {
        u64::from(lots).saturating_mul(u64::from(self.lot))
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.ticker, self.name, self.figi)
    }
}
