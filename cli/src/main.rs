//! Invest OpenAPI command-line client.
//!
//! Runs a single API call described by the arguments and prints the result
//! as JSON on stdout. Logs go to stderr.

mod command;
mod config;

use std::env;
use std::process::ExitCode;

use anyhow::Context;
use chrono::Utc;
use invest_sdk::TradingClient;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::command::{Command, Market, USAGE};
use crate::config::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,invest_sdk=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let command = match Command::parse(env::args().skip(1)) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("error: {}\n\n{}", err, USAGE);
            return Ok(ExitCode::from(2));
        }
    };

    // Load configuration from environment
    let settings = Settings::from_env()?;
    tracing::info!("API URL: {}", settings.base_url);

    let client = TradingClient::new(settings.client_config())?;
    run(&client, command).await?;

    Ok(ExitCode::SUCCESS)
}

async fn run(client: &TradingClient, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Portfolio => print_json(&client.portfolio().await?),
        Command::Orders => print_json(&client.orders().await?),
        Command::Market(market) => {
            let instruments = match market {
                Market::Stocks => client.stocks().await,
                Market::Bonds => client.bonds().await,
                Market::Etfs => client.etfs().await,
                Market::Currencies => client.currencies().await,
            }
            .with_context(|| format!("can't list {}", market))?;
            print_json(&instruments)
        }
        Command::Figi(figi) => {
            let instrument = client
                .search_instrument_by_figi(&figi)
                .await
                .map_err(|err| {
                    if err.is_not_found() {
                        anyhow::anyhow!("no instrument with FIGI {}", figi)
                    } else {
                        err.into()
                    }
                })?;
            print_json(&instrument)
        }
        Command::Ticker(ticker) => print_json(&client.search_instrument_by_ticker(&ticker).await?),
        Command::Operations { interval, figi } => {
            let from = Utc::now() - interval.duration();
            let operations = client
                .operations(from, interval, figi.as_deref())
                .await?;
            print_json(&operations)
        }
        Command::Cancel(id) => {
            client
                .cancel_order(&id)
                .await
                .with_context(|| format!("can't cancel order {}", id))?;
            tracing::info!("Order {} cancelled", id);
            Ok(())
        }
        Command::Limit {
            figi,
            lots,
            operation,
            price,
        } => {
            let placed = client
                .limit_order(&figi, lots, operation, price)
                .await
                .map_err(|err| {
                    if err.is_not_enough_balance() {
                        anyhow::anyhow!(
                            "not enough balance to {} {} lots of {}",
                            operation,
                            lots,
                            figi
                        )
                    } else {
                        err.into()
                    }
                })?;
            if placed.is_rejected() {
                tracing::warn!(
                    "Order {} rejected: {}",
                    placed.id,
                    placed.reject_reason.as_deref().unwrap_or("no reason given")
                );
            }
            print_json(&placed)
        }
    }
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("can't format output")?;
    println!("{}", json);
    Ok(())
}
