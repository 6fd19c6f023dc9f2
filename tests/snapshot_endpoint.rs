//! End-to-end tests for the proxy routes.
//!
//! Upstream providers are mocked with wiremock; the real router is served on
//! a loopback listener and driven with reqwest.

use std::net::SocketAddr;
use std::time::Duration;

use harris_proxy::config::Settings;
use harris_proxy::server::{self, AppState};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_settings(upstream: &str, timeout_secs: u64) -> Settings {
    Settings {
        finnhub_api_key: "test-token".to_string(),
        finviz_api_key: "test-auth".to_string(),
        finnhub_base_url: upstream.to_string(),
        finviz_base_url: upstream.to_string(),
        upstream_timeout_secs: timeout_secs,
        port: 0,
    }
}

async fn spawn_proxy(settings: &Settings) -> SocketAddr {
    let state = AppState::new(settings).unwrap();
    let app = server::build_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn mount_quote(server: &MockServer, symbol: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path("/quote"))
        .and(query_param("symbol", symbol))
        .and(query_param("token", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_profile(server: &MockServer, symbol: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path("/stock/profile2"))
        .and(query_param("symbol", symbol))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_snapshot_happy_path() {
    let upstream = MockServer::start().await;
    mount_quote(
        &upstream,
        "AAPL",
        json!({"c": 150.0, "pc": 145.0, "o": 148.0, "l": 144.0, "h": 151.0}),
    )
    .await;
    mount_profile(
        &upstream,
        "AAPL",
        json!({"marketCapitalization": 2500.0, "shareOutstanding": 1000.0}),
    )
    .await;

    let addr = spawn_proxy(&test_settings(&upstream.uri(), 5)).await;

    // Lowercase path parameter is upper-cased before use
    let response = reqwest::get(format!("http://{}/api/stock/aapl", addr))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert!(
        response
            .headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("application/json")
    );

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["ticker"], "AAPL");
    assert_eq!(body["price"], "150.00");
    assert_eq!(body["change"], "+5.00");
    assert_eq!(body["changePercent"], "+3.45");
    assert_eq!(body["marketCap"], "2.50B");
    assert_eq!(body["float"], "700.00M");
    assert_eq!(body["open"], "148.00");
    assert_eq!(body["prevClose"], "145.00");
    assert_eq!(body["dayRange"], "144.00 - 151.00");
    assert_eq!(body["range52w"], "N/A");
    assert_eq!(body["volume"], "N/A");
    assert_eq!(body["avgVolume"], "N/A");
    assert_eq!(body["short"], "N/A");
    assert_eq!(body["beta"], "N/A");
}

#[tokio::test]
async fn test_snapshot_is_byte_identical_across_requests() {
    let upstream = MockServer::start().await;
    mount_quote(
        &upstream,
        "MSFT",
        json!({"c": 410.5, "pc": 400.0, "o": 402.0, "l": 399.0, "h": 412.0}),
    )
    .await;
    mount_profile(
        &upstream,
        "MSFT",
        json!({"marketCapitalization": 3100.0, "shareOutstanding": 750.0}),
    )
    .await;

    let addr = spawn_proxy(&test_settings(&upstream.uri(), 5)).await;
    let url = format!("http://{}/api/stock/MSFT", addr);

    let first = reqwest::get(&url).await.unwrap().text().await.unwrap();
    let second = reqwest::get(&url).await.unwrap().text().await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_snapshot_with_empty_profile() {
    let upstream = MockServer::start().await;
    // Unknown symbols: quote comes back all zeros, profile as an empty object
    mount_quote(
        &upstream,
        "ZZZZ",
        json!({"c": 0.0, "pc": 0.0, "o": 0.0, "l": 0.0, "h": 0.0}),
    )
    .await;
    mount_profile(&upstream, "ZZZZ", json!({})).await;

    let addr = spawn_proxy(&test_settings(&upstream.uri(), 5)).await;
    let response = reqwest::get(format!("http://{}/api/stock/ZZZZ", addr))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["price"], "N/A");
    assert_eq!(body["change"], "N/A");
    assert_eq!(body["changePercent"], "N/A");
    assert_eq!(body["marketCap"], "N/A");
    assert_eq!(body["float"], "N/A");
    assert_eq!(body["dayRange"], "N/A");
}

#[tokio::test]
async fn test_snapshot_quote_timeout_returns_500() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quote"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"c": 1.0}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&upstream)
        .await;
    mount_profile(&upstream, "AAPL", json!({})).await;

    let addr = spawn_proxy(&test_settings(&upstream.uri(), 1)).await;
    let response = reqwest::get(format!("http://{}/api/stock/AAPL", addr))
        .await
        .unwrap();
    assert_eq!(response.status(), 500);

    let body: Value = response.json().await.unwrap();
    let message = body["error"].as_str().unwrap();
    assert!(!message.is_empty());
    assert!(message.contains("timeout") || message.contains("timed out"));
}

#[tokio::test]
async fn test_snapshot_upstream_error_status_returns_500() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quote"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&upstream)
        .await;
    mount_profile(&upstream, "AAPL", json!({})).await;

    let addr = spawn_proxy(&test_settings(&upstream.uri(), 5)).await;
    let response = reqwest::get(format!("http://{}/api/stock/AAPL", addr))
        .await
        .unwrap();
    assert_eq!(response.status(), 500);

    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("502"));
}

#[tokio::test]
async fn test_snapshot_malformed_upstream_body_returns_500() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quote"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&upstream)
        .await;
    mount_profile(&upstream, "AAPL", json!({})).await;

    let addr = spawn_proxy(&test_settings(&upstream.uri(), 5)).await;
    let response = reqwest::get(format!("http://{}/api/stock/AAPL", addr))
        .await
        .unwrap();
    assert_eq!(response.status(), 500);

    let body: Value = response.json().await.unwrap();
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_screener_relay() {
    let upstream = MockServer::start().await;
    let csv = "Ticker,Company\nAAPL,Apple Inc.\n";
    Mock::given(method("GET"))
        .and(path("/export.ashx"))
        .and(query_param("v", "111"))
        .and(query_param("f", "cap_smallover"))
        .and(query_param("c", "0,1,2,3,4,5,6"))
        .and(query_param("auth", "test-auth"))
        .respond_with(ResponseTemplate::new(200).set_body_string(csv))
        .mount(&upstream)
        .await;

    let addr = spawn_proxy(&test_settings(&upstream.uri(), 5)).await;
    let response = reqwest::get(format!("http://{}/api/screener?f=cap_smallover", addr))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert!(
        response
            .headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/csv")
    );
    assert_eq!(response.text().await.unwrap(), csv);
}

#[tokio::test]
async fn test_screener_signal_takes_precedence_over_filters() {
    let upstream = MockServer::start().await;
    // Only the signal-form URL is mounted; the filters-form would 404
    Mock::given(method("GET"))
        .and(path("/export.ashx"))
        .and(query_param("s", "ta_topgainers"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Ticker\n"))
        .mount(&upstream)
        .await;

    let addr = spawn_proxy(&test_settings(&upstream.uri(), 5)).await;
    let response = reqwest::get(format!(
        "http://{}/api/screener?f=cap_smallover&s=ta_topgainers",
        addr
    ))
    .await
    .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "Ticker\n");
}

#[tokio::test]
async fn test_news_relay_with_default_category() {
    let upstream = MockServer::start().await;
    let articles = json!([{"headline": "Markets rally", "category": "general"}]);
    Mock::given(method("GET"))
        .and(path("/news"))
        .and(query_param("category", "general"))
        .and(query_param("token", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(articles.clone()))
        .mount(&upstream)
        .await;

    let addr = spawn_proxy(&test_settings(&upstream.uri(), 5)).await;
    let response = reqwest::get(format!("http://{}/api/finnhub/news", addr))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body, articles);
}

#[tokio::test]
async fn test_health_endpoint() {
    let upstream = MockServer::start().await;
    let addr = spawn_proxy(&test_settings(&upstream.uri(), 5)).await;

    let response = reqwest::get(format!("http://{}/health", addr)).await.unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert!(body["current_system_time"].as_str().is_some());
}
