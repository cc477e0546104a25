//! Command-line parsing.

use std::fmt;

use invest_sdk::{OperationInterval, OperationType, SdkError};
use rust_decimal::Decimal;

/// Usage text printed on argument errors.
pub const USAGE: &str = "\
usage: invest-cli <command> [args]

commands:
  portfolio                              positions and currency balances
  orders                                 active orders
  stocks | bonds | etfs | currencies     tradable instruments
  figi <FIGI>                            instrument by FIGI
  ticker <TICKER>                        instruments by ticker
  operations <1day|7days|14days|30days> [FIGI]
                                         operation history
  cancel <ORDER_ID>                      cancel an order
  limit <FIGI> <LOTS> <Buy|Sell> <PRICE> place a limit order";

/// Instrument list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Market {
    /// Stocks.
    Stocks,
    /// Bonds.
    Bonds,
    /// Exchange-traded funds.
    Etfs,
    /// Currencies.
    Currencies,
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stocks => write!(f, "stocks"),
            Self::Bonds => write!(f, "bonds"),
            Self::Etfs => write!(f, "etfs"),
            Self::Currencies => write!(f, "currencies"),
        }
    }
}

/// A parsed CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show positions and currency balances.
    Portfolio,
    /// Show active orders.
    Orders,
    /// List instruments of a market.
    Market(Market),
    /// Look up an instrument by FIGI.
    Figi(String),
    /// Look up instruments by ticker.
    Ticker(String),
    /// Show the operation history.
    Operations {
        /// Look-back interval ending now.
        interval: OperationInterval,
        /// Optional instrument filter.
        figi: Option<String>,
    },
    /// Cancel an order.
    Cancel(String),
    /// Place a limit order.
    Limit {
        /// Instrument FIGI.
        figi: String,
        /// Number of lots.
        lots: u32,
        /// `Buy` or `Sell`.
        operation: OperationType,
        /// Limit price.
        price: Decimal,
    },
}

impl Command {
    /// Parses a command from the arguments following the program name.
    ///
    /// # Errors
    ///
    /// Returns an error if the command is unknown or an argument is missing
    /// or malformed.
    pub fn parse<I>(args: I) -> Result<Self, CommandError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let name = args.next().ok_or(CommandError::MissingCommand)?;

        let command = match name.as_str() {
            "portfolio" => Self::Portfolio,
            "orders" => Self::Orders,
            "stocks" => Self::Market(Market::Stocks),
            "bonds" => Self::Market(Market::Bonds),
            "etfs" => Self::Market(Market::Etfs),
            "currencies" => Self::Market(Market::Currencies),
            "figi" => Self::Figi(required(&mut args, "FIGI")?),
            "ticker" => Self::Ticker(required(&mut args, "TICKER")?),
            "operations" => Self::Operations {
                interval: required(&mut args, "INTERVAL")?.parse()?,
                figi: args.next(),
            },
            "cancel" => Self::Cancel(required(&mut args, "ORDER_ID")?),
            "limit" => {
                let figi = required(&mut args, "FIGI")?;
                let lots: u32 = required(&mut args, "LOTS")?
                    .parse()
                    .map_err(|_| CommandError::InvalidArgument("LOTS"))?;
                let operation: OperationType = required(&mut args, "OPERATION")?.parse()?;
                if !matches!(operation, OperationType::Buy | OperationType::Sell) {
                    return Err(CommandError::InvalidArgument("OPERATION"));
                }
                let price: Decimal = required(&mut args, "PRICE")?
                    .parse()
                    .map_err(|_| CommandError::InvalidArgument("PRICE"))?;

                Self::Limit {
                    figi,
                    lots,
                    operation,
                    price,
                }
            }
            _ => return Err(CommandError::UnknownCommand(name)),
        };

        match args.next() {
            Some(extra) => Err(CommandError::UnexpectedArgument(extra)),
            None => Ok(command),
        }
    }
}

fn required(
    args: &mut impl Iterator<Item = String>,
    name: &'static str,
) -> Result<String, CommandError> {
    args.next().ok_or(CommandError::MissingArgument(name))
}

/// Argument errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// No command given.
    #[error("missing command")]
    MissingCommand,

    /// Unknown command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Required argument missing.
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    /// Argument present but malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Trailing argument.
    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),

    /// Enumeration value not recognized.
    #[error(transparent)]
    Value(#[from] SdkError),
}
