//! HTTP client implementation.
//!
//! Provides the main HTTP client for interacting with the Invest OpenAPI.

use bytes::Bytes;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::config::ClientConfig;
use super::error::ClientError;
use super::response::{classify, decode_payload, CurrencyList, InstrumentList, PositionList};
use crate::types::{
    CurrencyBalance, Instrument, LimitOrderRequest, Operation, OperationInterval, OperationType,
    Order, PlacedLimitOrder, Portfolio, PositionBalance,
};

const APPLICATION_JSON: &str = "application/json";

/// HTTP client for the Invest OpenAPI.
///
/// Cloning is cheap and clones share the underlying connection pool. The
/// client holds no per-call state, so one instance can serve concurrent
/// calls from many tasks.
#[derive(Debug, Clone)]
pub struct TradingClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl TradingClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ClientError::InvalidConfig(format!("can't build http client: {}", e)))?;

        Ok(Self { config, http })
    }

    /// Creates a new client for the production API.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is invalid.
    pub fn with_token(token: impl Into<String>) -> Result<Self, ClientError> {
        Self::new(ClientConfig::new(token))
    }

    /// Creates a new client for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_base_url(
        token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ClientError> {
        Self::new(ClientConfig::new(token).with_base_url(base_url))
    }

    /// Returns the client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Builds the absolute URL of an endpoint.
    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ClientError> {
        let raw = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);

        let parsed = if query.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, query)
        };

        parsed.map_err(|source| ClientError::InvalidUrl { url: raw, source })
    }

    /// Builds an authenticated JSON request.
    fn request(&self, method: Method, url: Url, body: Option<Vec<u8>>) -> reqwest::RequestBuilder {
        let builder = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON))
            .bearer_auth(&self.config.token);

        match body {
            Some(body) => builder.body(body),
            None => builder,
        }
    }

    /// Sends a request and returns the body of a `200 OK` response.
    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<Bytes, ClientError> {
        let target = url.to_string();
        debug!(%method, url = %target, "sending request");

        let response = self
            .request(method, url, body)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: target.clone(),
                source,
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|source| ClientError::Transport {
                url: target.clone(),
                source,
            })?;
        debug!(url = %target, status = status.as_u16(), len = body.len(), "received response");

        classify(&target, status, &body)?;
        Ok(body)
    }

    /// Makes a GET request and decodes the payload.
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        let target = url.to_string();
        let body = self.send(Method::GET, url, None).await?;
        decode_payload(&target, &body)
    }

    /// Makes a POST request with a JSON body and decodes the payload.
    async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl serde::Serialize,
    ) -> Result<T, ClientError> {
        let target = url.to_string();
        let bytes = serde_json::to_vec(body).map_err(|source| ClientError::Serialization {
            url: target.clone(),
            source,
        })?;

        let body = self.send(Method::POST, url, Some(bytes)).await?;
        decode_payload(&target, &body)
    }

    async fn instruments(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<Instrument>, ClientError> {
        let list: InstrumentList = self.get(self.endpoint(path, query)?).await?;
        Ok(list.instruments)
    }

    /// Looks up an instrument by FIGI.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if no instrument has this FIGI, or
    /// another error if the request fails.
    pub async fn search_instrument_by_figi(&self, figi: &str) -> Result<Instrument, ClientError> {
        self.get(self.endpoint("/market/search/by-figi", &[("figi", figi)])?)
            .await
    }

    /// Looks up instruments by ticker.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn search_instrument_by_ticker(
        &self,
        ticker: &str,
    ) -> Result<Vec<Instrument>, ClientError> {
        self.instruments("/market/search/by-ticker", &[("ticker", ticker)])
            .await
    }

    /// Lists tradable currencies.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn currencies(&self) -> Result<Vec<Instrument>, ClientError> {
        self.instruments("/market/currencies", &[]).await
    }

    /// Lists tradable ETFs.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn etfs(&self) -> Result<Vec<Instrument>, ClientError> {
        self.instruments("/market/etfs", &[]).await
    }

    /// Lists tradable bonds.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn bonds(&self) -> Result<Vec<Instrument>, ClientError> {
        self.instruments("/market/bonds", &[]).await
    }

    /// Lists tradable stocks.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn stocks(&self) -> Result<Vec<Instrument>, ClientError> {
        self.instruments("/market/stocks", &[]).await
    }

    /// Gets the operation history.
    ///
    /// # Arguments
    ///
    /// * `from` - Start of the history window
    /// * `interval` - Length of the history window
    /// * `figi` - Optional instrument to filter by
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn operations(
        &self,
        from: DateTime<Utc>,
        interval: OperationInterval,
        figi: Option<&str>,
    ) -> Result<Vec<Operation>, ClientError> {
        let from = from.to_rfc3339_opts(SecondsFormat::Secs, true);
        let mut query = vec![("from", from.as_str()), ("interval", interval.as_str())];
        if let Some(figi) = figi.filter(|f| !f.is_empty()) {
            query.push(("figi", figi));
        }

        self.get(self.endpoint("/operations", &query)?).await
    }

    /// Gets both security positions and currency balances.
    ///
    /// # Errors
    ///
    /// Returns an error if either request fails.
    pub async fn portfolio(&self) -> Result<Portfolio, ClientError> {
        let positions = self.positions_portfolio().await?;
        let currencies = self.currencies_portfolio().await?;

        Ok(Portfolio {
            positions,
            currencies,
        })
    }

    /// Gets the security positions.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn positions_portfolio(&self) -> Result<Vec<PositionBalance>, ClientError> {
        let list: PositionList = self.get(self.endpoint("/portfolio", &[])?).await?;
        Ok(list.positions)
    }

    /// Gets the currency balances.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn currencies_portfolio(&self) -> Result<Vec<CurrencyBalance>, ClientError> {
        let list: CurrencyList = self
            .get(self.endpoint("/portfolio/currencies", &[])?)
            .await?;
        Ok(list.currencies)
    }

    /// Cancels an order.
    ///
    /// The body of a successful response is not inspected.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the broker rejects it.
    pub async fn cancel_order(&self, id: &str) -> Result<(), ClientError> {
        let url = self.endpoint("/orders/cancel", &[("orderId", id)])?;
        self.send(Method::POST, url, None).await?;
        Ok(())
    }

    /// Places a limit order.
    ///
    /// # Arguments
    ///
    /// * `figi` - Instrument to trade
    /// * `lots` - Number of lots
    /// * `operation` - `Buy` or `Sell`
    /// * `price` - Limit price
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidRequest`] for a zero lot count or a
    /// non-positive price, or another error if the request fails. A broker
    /// rejection for lack of funds satisfies
    /// [`ClientError::is_not_enough_balance`].
    pub async fn limit_order(
        &self,
        figi: &str,
        lots: u32,
        operation: OperationType,
        price: Decimal,
    ) -> Result<PlacedLimitOrder, ClientError> {
        let request = LimitOrderRequest::new(lots, operation, price)?;
        let url = self.endpoint("/orders/limit-order", &[("figi", figi)])?;
        self.post(url, &request).await
    }

    /// Gets the active orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn orders(&self) -> Result<Vec<Order>, ClientError> {
        self.get(self.endpoint("/orders", &[])?).await
    }
}
