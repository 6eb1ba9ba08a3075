#![allow(clippy::unwrap_used)]
// Integration tests for `AirClient` using wiremock.

use std::time::Duration;

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use airdeck_api::{AirClient, Error, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, AirClient) {
    setup_with(TransportConfig::default()).await
}

async fn setup_with(transport: TransportConfig) -> (MockServer, AirClient) {
    let server = MockServer::start().await;
    let port = Url::parse(&server.uri()).unwrap().port().unwrap();
    let client = AirClient::new(&transport.with_port(port)).unwrap();
    (server, client)
}

const HOST: &str = "127.0.0.1";

// ── Reading tests ───────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_reading() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/air-data/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "timestamp": "2024-06-15T10:30:00.000Z",
            "score": 91,
            "temp": 21.5,
            "humid": 44.0,
            "co2": 480,
            "voc": 95,
            "pm25": 2,
            "pm10_est": 3
        })))
        .mount(&server)
        .await;

    let data = client.fetch_reading(HOST).await.unwrap();

    assert_eq!(data.score, 91);
    assert!((data.temp - 21.5).abs() < f64::EPSILON);
    assert_eq!(data.pm10_est, Some(3.0));
    assert!(data.dew_point.is_none());
}

#[tokio::test]
async fn test_fetch_reading_non_success_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/air-data/latest"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = client.fetch_reading(HOST).await;

    assert!(
        matches!(result, Err(Error::Status { status: 503 })),
        "expected Status error, got: {result:?}"
    );
    assert!(result.unwrap_err().is_transient());
}

#[tokio::test]
async fn test_fetch_reading_malformed_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/air-data/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client.fetch_reading(HOST).await;

    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_fetch_reading_body_too_large() {
    let transport = TransportConfig {
        max_body_bytes: 64,
        ..TransportConfig::default()
    };
    let (server, client) = setup_with(transport).await;

    let padding = "x".repeat(256);
    Mock::given(method("GET"))
        .and(path("/air-data/latest"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "timestamp": padding, "score": 1 })),
        )
        .mount(&server)
        .await;

    let result = client.fetch_reading(HOST).await;

    assert!(
        matches!(result, Err(Error::BodyTooLarge { limit: 64 })),
        "expected BodyTooLarge error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_fetch_reading_timeout() {
    let transport = TransportConfig::default().with_timeout(Duration::from_millis(200));
    let (server, client) = setup_with(transport).await;

    Mock::given(method("GET"))
        .and(path("/air-data/latest"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "score": 1 }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let result = client.fetch_reading(HOST).await;

    assert!(
        matches!(result, Err(Error::Timeout { .. })),
        "expected Timeout error, got: {result:?}"
    );
}

// ── Config tests ────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_config() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/settings/config/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "device_uuid": "awair-element_4821",
            "wifi_mac": "70:88:6B:00:00:01",
            "ssid": "home",
            "ip": "127.0.0.1",
            "fw_version": "1.2.8"
        })))
        .mount(&server)
        .await;

    let cfg = client.fetch_config(HOST).await.unwrap();

    assert_eq!(cfg.device_uuid, "awair-element_4821");
    assert_eq!(cfg.fw_version, "1.2.8");
    assert!(cfg.timezone.is_empty());
}

#[tokio::test]
async fn test_fetch_config_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/settings/config/data"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client.fetch_config(HOST).await.unwrap_err();
    assert!(err.is_not_found());
}
