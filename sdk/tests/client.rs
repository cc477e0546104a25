//! HTTP-level tests for `TradingClient` against a mock broker.

use std::time::Duration;

use chrono::{TimeZone, Utc};
use invest_sdk::{
    ClientConfig, ClientError, Currency, InstrumentType, OperationInterval, OperationType,
    OrderStatus, TradingClient,
};
use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "t.test-token";

fn client_for(server: &MockServer) -> TradingClient {
    let config = ClientConfig::new(TOKEN).with_base_url(format!("{}/openapi", server.uri()));
    TradingClient::new(config).expect("client")
}

fn instrument_json(figi: &str, ticker: &str) -> serde_json::Value {
    json!({
        "figi": figi,
        "ticker": ticker,
        "isin": "US0378331005",
        "minPriceIncrement": 0.01,
        "lot": 1,
        "currency": "USD",
        "name": "Apple",
        "type": "Stock"
    })
}

#[tokio::test]
async fn cancel_order_posts_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openapi/orders/cancel"))
        .and(query_param("orderId", "42"))
        .and(header("authorization", "Bearer t.test-token"))
        .and(header("content-type", "application/json"))
        .and(body_string(""))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.cancel_order("42").await.expect("cancel");
}

#[tokio::test]
async fn cancel_order_ignores_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openapi/orders/cancel"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.cancel_order("42").await.is_ok());
}

#[tokio::test]
async fn limit_order_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openapi/orders/limit-order"))
        .and(query_param("figi", "BBG000B9XRY4"))
        .and(header("authorization", "Bearer t.test-token"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"lots": 10, "operation": "Buy", "price": 150.5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "trackingId": "a1",
            "status": "Ok",
            "payload": {
                "orderId": "19bd4b3a",
                "operation": "Buy",
                "status": "New",
                "requestedLots": 10,
                "executedLots": 0,
                "commission": {"currency": "USD", "value": 0.75}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let placed = client
        .limit_order("BBG000B9XRY4", 10, OperationType::Buy, Decimal::new(1505, 1))
        .await
        .expect("limit order");

    assert_eq!(placed.id, "19bd4b3a");
    assert_eq!(placed.status, OrderStatus::New);
    assert_eq!(placed.requested_lots, 10);
    assert_eq!(
        placed.commission.map(|c| c.value),
        Some(Decimal::new(75, 2))
    );

    let requests = server.received_requests().await.expect("recorded requests");
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].body,
        br#"{"lots":10,"operation":"Buy","price":150.5}"#.to_vec()
    );
}

#[tokio::test]
async fn limit_order_rejects_zero_lots_locally() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let err = client
        .limit_order("BBG000B9XRY4", 0, OperationType::Sell, Decimal::ONE)
        .await
        .expect_err("invalid lots");

    assert!(matches!(err, ClientError::InvalidRequest(_)));
    let requests = server.received_requests().await.expect("recorded requests");
    assert!(requests.is_empty());
}

#[tokio::test]
async fn limit_order_not_enough_balance() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openapi/orders/limit-order"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "trackingId": "c9f1",
            "status": "Error",
            "payload": {"message": "Недостаточно активов для сделки", "code": "NOT_ENOUGH_BALANCE"}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .limit_order("BBG000B9XRY4", 1000, OperationType::Buy, Decimal::new(1505, 1))
        .await
        .expect_err("broker error");

    assert!(err.is_not_enough_balance());
    let broker = err.broker_error().expect("broker error");
    assert_eq!(broker.tracking_id, "c9f1");
    assert_eq!(broker.status, "Error");
    assert_eq!(broker.message(), "Недостаточно активов для сделки");
}

#[tokio::test]
async fn partial_broker_error_keeps_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openapi/orders/limit-order"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "status": "Error",
            "payload": {"message": "Insufficient balance", "code": "NOT_ENOUGH_BALANCE"}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .limit_order("BBG000B9XRY4", 1, OperationType::Buy, Decimal::ONE)
        .await
        .expect_err("broker error");

    assert!(matches!(err, ClientError::Broker(_)));
    assert!(err.is_not_enough_balance());
    assert_eq!(err.broker_error().map(|b| b.tracking_id.as_str()), Some(""));
}

#[tokio::test]
async fn search_by_figi_decodes_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openapi/market/search/by-figi"))
        .and(query_param("figi", "BBG000B9XRY4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "trackingId": "a2",
            "status": "Ok",
            "payload": instrument_json("BBG000B9XRY4", "AAPL")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let instrument = client
        .search_instrument_by_figi("BBG000B9XRY4")
        .await
        .expect("instrument");

    assert_eq!(instrument.ticker, "AAPL");
    assert_eq!(instrument.currency, Some(Currency::Usd));
    assert_eq!(instrument.instrument_type, InstrumentType::Stock);
}

#[tokio::test]
async fn not_found_ignores_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openapi/market/search/by-figi"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "trackingId": "a3",
            "status": "Error",
            "payload": {"message": "Instrument not found", "code": "NOT_FOUND"}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .search_instrument_by_figi("BBG000000000")
        .await
        .expect_err("not found");

    assert!(err.is_not_found());
    assert!(err.broker_error().is_none());
}

#[tokio::test]
async fn unparseable_error_body_keeps_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openapi/orders"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.orders().await.expect_err("bad gateway");

    match err {
        ClientError::UnexpectedStatus { url, status, body } => {
            assert!(url.ends_with("/openapi/orders"));
            assert_eq!(status, 502);
            assert_eq!(body, "<html>Bad Gateway</html>");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn shape_mismatch_reports_url_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openapi/portfolio"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"payload":{"positions":{}}}"#),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.positions_portfolio().await.expect_err("decode");

    match err {
        ClientError::Decode { url, body, .. } => {
            assert!(url.ends_with("/openapi/portfolio"));
            assert_eq!(body, r#"{"payload":{"positions":{}}}"#);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn market_lists_unwrap_instruments() {
    let server = MockServer::start().await;
    for (endpoint, ticker) in [
        ("/openapi/market/stocks", "AAPL"),
        ("/openapi/market/bonds", "SU26209RMFS5"),
        ("/openapi/market/etfs", "FXUS"),
        ("/openapi/market/currencies", "USD000UTSTOM"),
    ] {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "trackingId": "a4",
                "status": "Ok",
                "payload": {"total": 1, "instruments": [instrument_json("BBG000B9XRY4", ticker)]}
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = client_for(&server);
    let stocks = client.stocks().await.expect("stocks");
    let bonds = client.bonds().await.expect("bonds");
    let etfs = client.etfs().await.expect("etfs");
    let currencies = client.currencies().await.expect("currencies");

    assert_eq!(stocks[0].ticker, "AAPL");
    assert_eq!(bonds[0].ticker, "SU26209RMFS5");
    assert_eq!(etfs[0].ticker, "FXUS");
    assert_eq!(currencies[0].ticker, "USD000UTSTOM");
}

#[tokio::test]
async fn search_by_ticker_returns_all_matches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openapi/market/search/by-ticker"))
        .and(query_param("ticker", "AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "trackingId": "a5",
            "status": "Ok",
            "payload": {
                "total": 2,
                "instruments": [
                    instrument_json("BBG000B9XRY4", "AAPL"),
                    instrument_json("BBG000B9Y5X2", "AAPL")
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let instruments = client
        .search_instrument_by_ticker("AAPL")
        .await
        .expect("instruments");

    assert_eq!(instruments.len(), 2);
    assert_eq!(instruments[1].figi, "BBG000B9Y5X2");
}

#[tokio::test]
async fn operations_sends_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openapi/operations"))
        .and(query_param("from", "2019-08-19T18:38:33Z"))
        .and(query_param("interval", "7days"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "trackingId": "a6",
            "status": "Ok",
            "payload": [{
                "id": "op-1",
                "status": "Done",
                "currency": "RUB",
                "payment": 1000,
                "isMarginCall": false,
                "date": "2019-08-20T10:00:00+03:00",
                "operationType": "PayIn"
            }]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let from = Utc.with_ymd_and_hms(2019, 8, 19, 18, 38, 33).unwrap();

    let all = client
        .operations(from, OperationInterval::Week, None)
        .await
        .expect("operations");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].operation_type, OperationType::PayIn);

    client
        .operations(from, OperationInterval::Week, Some("BBG000B9XRY4"))
        .await
        .expect("operations");

    let requests = server.received_requests().await.expect("recorded requests");
    let figis: Vec<Option<String>> = requests
        .iter()
        .map(|r| {
            r.url
                .query_pairs()
                .find(|(k, _)| k == "figi")
                .map(|(_, v)| v.into_owned())
        })
        .collect();
    assert_eq!(figis, vec![None, Some("BBG000B9XRY4".to_string())]);
}

#[tokio::test]
async fn portfolio_combines_positions_and_currencies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openapi/portfolio"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "trackingId": "a7",
            "status": "Ok",
            "payload": {"positions": [{
                "figi": "BBG000B9XRY4",
                "ticker": "AAPL",
                "instrumentType": "Stock",
                "balance": 10,
                "lots": 10,
                "name": "Apple"
            }]}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/openapi/portfolio/currencies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "trackingId": "a8",
            "status": "Ok",
            "payload": {"currencies": [
                {"currency": "RUB", "balance": 1500.25},
                {"currency": "USD", "balance": 20, "blocked": 5}
            ]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let portfolio = client.portfolio().await.expect("portfolio");

    assert_eq!(portfolio.positions.len(), 1);
    assert_eq!(portfolio.currencies.len(), 2);
    assert_eq!(
        portfolio.currency(Currency::Usd).map(|c| c.available()),
        Some(Decimal::from(15))
    );
    assert!(portfolio.position("BBG000B9XRY4").is_some());
}

#[tokio::test]
async fn orders_decodes_payload_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openapi/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "trackingId": "a9",
            "status": "Ok",
            "payload": [{
                "orderId": "42",
                "figi": "BBG000B9XRY4",
                "operation": "Sell",
                "status": "New",
                "requestedLots": 3,
                "executedLots": 1,
                "type": "Limit",
                "price": 151.2
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let orders = client.orders().await.expect("orders");

    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].id, "42");
    assert_eq!(orders[0].remaining_lots(), 2);
    assert_eq!(orders[0].price, Decimal::new(1512, 1));
}

#[tokio::test]
async fn every_request_is_authenticated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"payload": []})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.orders().await.expect("orders");
    client
        .operations(Utc::now(), OperationInterval::Day, None)
        .await
        .expect("operations");
    client.cancel_order("7").await.expect("cancel");

    let requests = server.received_requests().await.expect("recorded requests");
    assert_eq!(requests.len(), 3);
    for request in &requests {
        let authorization = request
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok());
        let content_type = request
            .headers
            .get("content-type")
            .and_then(|v| v.to_str().ok());
        assert_eq!(authorization, Some("Bearer t.test-token"));
        assert_eq!(content_type, Some("application/json"));
    }
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openapi/orders"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"payload": []}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = ClientConfig::new(TOKEN)
        .with_base_url(format!("{}/openapi", server.uri()))
        .with_timeout(Duration::from_millis(100));
    let client = TradingClient::new(config).expect("client");

    let err = client.orders().await.expect_err("timeout");
    assert!(err.is_timeout());
    assert!(matches!(err, ClientError::Transport { .. }));
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let client =
        TradingClient::with_base_url(TOKEN, format!("http://{}/openapi", addr)).expect("client");
    let err = client.orders().await.expect_err("connection refused");

    match &err {
        ClientError::Transport { url, .. } => assert!(url.ends_with("/openapi/orders")),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!err.is_timeout());
}

#[tokio::test]
async fn shared_client_serves_concurrent_calls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openapi/market/search/by-figi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "payload": instrument_json("BBG000B9XRY4", "AAPL")
        })))
        .expect(8)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { client.search_instrument_by_figi("BBG000B9XRY4").await })
        })
        .collect();

    let results = futures::future::join_all(handles).await;
    for result in results {
        let instrument = result.expect("task").expect("instrument");
        assert_eq!(instrument.figi, "BBG000B9XRY4");
    }
}
