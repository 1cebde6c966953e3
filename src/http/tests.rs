//! Tests for the HTTP client module

use super::*;
use crate::auth::Credentials;
use crate::error::Error;
use crate::types::BackoffType;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::{Duration, Instant};
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const TEST_KEY: &str = "test_dHar4XY7LxsDOtmnkVtjNVWXLSlXsM";

fn fast_retry_client(server: &MockServer) -> HttpClient {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .retry_delay(Duration::from_millis(10))
        .build();
    HttpClient::with_config(config).unwrap()
}

fn error_body(status: u16, title: &str, detail: &str) -> serde_json::Value {
    json!({
        "status": status,
        "title": title,
        "detail": detail,
        "_links": {
            "documentation": {
                "href": "https://docs.mollie.com/overview/handling-errors",
                "type": "text/html"
            }
        }
    })
}

fn idempotency_keys(requests: &[Request]) -> Vec<String> {
    requests
        .iter()
        .filter_map(|r| r.headers.get("idempotency-key"))
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.max_retries, 2);
    assert_eq!(config.initial_backoff, Duration::from_secs(2));
    assert_eq!(config.backoff_type, BackoffType::Constant);
    assert!(config.rate_limit.is_none());
    assert!(config.credentials.is_none());
    assert!(config.user_agent.starts_with("mollie-client-rust/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.example.com/v2")
        .timeout(Duration::from_secs(60))
        .max_retries(5)
        .backoff(
            BackoffType::Linear,
            Duration::from_millis(200),
            Duration::from_secs(30),
        )
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .rate_limit(RateLimiterConfig::new(5, 5))
        .build();

    assert_eq!(config.base_url, "https://api.example.com/v2");
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.max_retries, 5);
    assert_eq!(config.backoff_type, BackoffType::Linear);
    assert_eq!(config.initial_backoff, Duration::from_millis(200));
    assert_eq!(config.max_backoff, Duration::from_secs(30));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
    assert_eq!(config.rate_limit, Some(RateLimiterConfig::new(5, 5)));
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .query("limit", "10")
        .queries([("from", "tr_1"), ("profileId", "pfl_1")])
        .header("X-Request-Id", "abc123")
        .json(json!({"key": "value"}))
        .idempotency_key("key-1")
        .timeout(Duration::from_secs(10))
        .retries(0);

    assert_eq!(config.query.get("limit"), Some(&"10".to_string()));
    assert_eq!(config.query.get("from"), Some(&"tr_1".to_string()));
    assert_eq!(config.query.get("profileId"), Some(&"pfl_1".to_string()));
    assert_eq!(
        config.headers.get("X-Request-Id"),
        Some(&"abc123".to_string())
    );
    assert!(config.body.is_some());
    assert_eq!(config.idempotency_key.as_deref(), Some("key-1"));
    assert_eq!(config.timeout, Some(Duration::from_secs(10)));
    assert_eq!(config.max_retries, Some(0));
}

#[test]
fn test_invalid_credentials_rejected_at_construction() {
    let config = HttpClientConfig::builder()
        .credentials(Credentials::ApiKey("not-a-key".to_string()))
        .build();
    assert!(matches!(
        HttpClient::with_config(config),
        Err(Error::Credentials { .. })
    ));
}

#[tokio::test]
async fn test_http_client_get_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/payments/tr_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resource": "payment",
            "id": "tr_1"
        })))
        .mount(&mock_server)
        .await;

    let client = fast_retry_client(&mock_server);
    let data: serde_json::Value = client.get_json("/payments/tr_1").await.unwrap();

    assert_eq!(data["id"], "tr_1");
}

#[tokio::test]
async fn test_http_client_query_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/payments"))
        .and(query_param("from", "tr_5"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = fast_retry_client(&mock_server);
    let response = client
        .get_with_config(
            "payments",
            RequestConfig::new().query("from", "tr_5").query("limit", "2"),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_bearer_auth() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/methods"))
        .and(header("Authorization", format!("Bearer {TEST_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .credentials(Credentials::api_key(TEST_KEY).unwrap())
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let response = client.get("/methods").await.unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_default_and_request_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/profiles/me"))
        .and(header("X-Client", "default"))
        .and(header("X-Request-Id", "req-456"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .header("X-Client", "default")
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let response = client
        .get_with_config(
            "/profiles/me",
            RequestConfig::new().header("X-Request-Id", "req-456"),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_retry_on_500() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/payments/tr_flaky"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/payments/tr_flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "tr_flaky"})))
        .mount(&mock_server)
        .await;

    let client = fast_retry_client(&mock_server);
    let response = client.get("/payments/tr_flaky").await.unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_retry_keeps_idempotency_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/payments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "tr_new"})))
        .mount(&mock_server)
        .await;

    let client = fast_retry_client(&mock_server);
    let response = client
        .post("/payments", json!({"description": "Order #1"}))
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);

    let keys = idempotency_keys(&requests);
    assert_eq!(keys.len(), 2);
    assert!(!keys[0].is_empty());
    assert_eq!(keys[0], keys[1]);
}

#[tokio::test]
async fn test_supplied_idempotency_key_is_kept_across_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/customers/cst_1"))
        .and(header("Idempotency-Key", "caller-key"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/customers/cst_1"))
        .and(header("Idempotency-Key", "caller-key"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = fast_retry_client(&mock_server);
    let response = client
        .delete_with_config(
            "/customers/cst_1",
            RequestConfig::new().idempotency_key("caller-key"),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 204);
}

#[tokio::test]
async fn test_each_logical_call_gets_its_own_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/customers"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = fast_retry_client(&mock_server);
    client.post("/customers", json!({"name": "A"})).await.unwrap();
    client.post("/customers", json!({"name": "B"})).await.unwrap();

    let keys = idempotency_keys(&mock_server.received_requests().await.unwrap());
    assert_eq!(keys.len(), 2);
    assert_ne!(keys[0], keys[1]);
}

#[tokio::test]
async fn test_get_has_no_idempotency_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/payments/tr_1"))
        .and(header_exists("Idempotency-Key"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/payments/tr_1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = fast_retry_client(&mock_server);
    let response = client
        .get_with_config("/payments/tr_1", RequestConfig::new().retries(0))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_retry_ceiling_three_attempts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/payments"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(error_body(500, "Internal Server Error", "early failure")),
        )
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/payments"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_json(error_body(503, "Service Unavailable", "final failure")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = fast_retry_client(&mock_server);
    let err = client.get("/payments").await.unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert_eq!(
        err.to_string(),
        "Service Unavailable (HTTP 503): final failure"
    );
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_no_retry_on_401() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/payments"))
        .respond_with(ResponseTemplate::new(401).set_body_json(error_body(
            401,
            "Unauthorized Request",
            "Missing authentication, or failed to authenticate",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = fast_retry_client(&mock_server);
    let err = client.get("/payments").await.unwrap_err();

    assert!(matches!(err, Error::Api { status: 401, .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_no_retry_on_422_keeps_field() {
    let mock_server = MockServer::start().await;

    let mut body = error_body(
        422,
        "Unprocessable Entity",
        "The amount is higher than the maximum",
    );
    body["field"] = json!("amount");

    Mock::given(method("POST"))
        .and(path("/payments"))
        .respond_with(ResponseTemplate::new(422).set_body_json(body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = fast_retry_client(&mock_server);
    let err = client
        .post("/payments", json!({"amount": {"currency": "EUR", "value": "1000000.00"}}))
        .await
        .unwrap_err();

    assert_eq!(err.field(), Some("amount"));
    assert_eq!(err.status(), Some(422));
}

#[tokio::test]
async fn test_no_retry_on_429() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/payments"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "1"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = fast_retry_client(&mock_server);
    let err = client.get("/payments").await.unwrap_err();
    assert_eq!(err.status(), Some(429));
}

#[tokio::test]
async fn test_retry_after_overrides_default_delay() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/payments"))
        .respond_with(ResponseTemplate::new(503).insert_header("retry-after", "1"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/payments"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    // Default delay is 10ms; the server asks for a full second
    let client = fast_retry_client(&mock_server);
    let started = Instant::now();
    let response = client.get("/payments").await.unwrap();

    assert_eq!(response.status(), 200);
    assert!(started.elapsed() >= Duration::from_secs(1));
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 2);
}

#[test]
fn test_retry_delay_prefers_retry_after() {
    let client = HttpClient::with_config(HttpClientConfig::default()).unwrap();

    assert_eq!(
        client.retry_delay(Some(Duration::from_secs(5)), 0),
        Duration::from_secs(5)
    );
    assert_eq!(
        client.retry_delay(Some(Duration::from_secs(5)), 1),
        Duration::from_secs(5)
    );
    assert_eq!(client.retry_delay(None, 0), client.calculate_backoff(0));
    assert_eq!(client.retry_delay(None, 0), Duration::from_secs(2));
}

#[tokio::test]
async fn test_retry_after_header_classified_as_transient_delay() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(
            ResponseTemplate::new(503)
                .insert_header("retry-after", "5")
                .set_body_json(error_body(503, "Service Unavailable", "maintenance")),
        )
        .mount(&mock_server)
        .await;

    let response = reqwest::get(format!("{}/status", mock_server.uri()))
        .await
        .unwrap();
    match Attempt::from_response(response).await {
        Attempt::Transient { error, retry_after } => {
            assert_eq!(retry_after, Some(Duration::from_secs(5)));
            assert_eq!(error.status(), Some(503));
        }
        other => panic!("expected a transient outcome, got {other:?}"),
    }
}

#[tokio::test]
async fn test_max_retries_override_per_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/payments"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = fast_retry_client(&mock_server);
    let result = client
        .get_with_config("/payments", RequestConfig::new().retries(0))
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_connection_failure_is_retried_then_surfaced() {
    // Nothing listens on port 1
    let config = HttpClientConfig::builder()
        .base_url("http://127.0.0.1:1")
        .retry_delay(Duration::from_millis(10))
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let err = client.get("/payments").await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_request_optional_json_no_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/customers/cst_1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = fast_retry_client(&mock_server);
    let result: Option<serde_json::Value> = client
        .request_optional_json(
            reqwest::Method::DELETE,
            "/customers/cst_1",
            RequestConfig::new(),
        )
        .await
        .unwrap();

    assert!(result.is_none());
}

#[test]
fn test_build_url() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.mollie.com/v2/")
        .build();
    let client = HttpClient::with_config(config).unwrap();

    assert_eq!(
        client.build_url("/payments"),
        "https://api.mollie.com/v2/payments"
    );
    assert_eq!(
        client.build_url("payments/tr_1/refunds"),
        "https://api.mollie.com/v2/payments/tr_1/refunds"
    );
    assert_eq!(
        client.build_url("https://api.mollie.com/v2/payments?from=tr_2&limit=5"),
        "https://api.mollie.com/v2/payments?from=tr_2&limit=5"
    );
}

#[test]
fn test_calculate_backoff_constant_default() {
    let client = HttpClient::with_config(HttpClientConfig::default()).unwrap();

    assert_eq!(client.calculate_backoff(0), Duration::from_secs(2));
    assert_eq!(client.calculate_backoff(1), Duration::from_secs(2));
    assert_eq!(client.calculate_backoff(5), Duration::from_secs(2));
}

#[test]
fn test_calculate_backoff_linear() {
    let config = HttpClientConfig::builder()
        .backoff(
            BackoffType::Linear,
            Duration::from_millis(100),
            Duration::from_secs(10),
        )
        .build();
    let client = HttpClient::with_config(config).unwrap();

    assert_eq!(client.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(client.calculate_backoff(1), Duration::from_millis(200));
    assert_eq!(client.calculate_backoff(2), Duration::from_millis(300));
}

#[test]
fn test_calculate_backoff_exponential_respects_max() {
    let config = HttpClientConfig::builder()
        .backoff(
            BackoffType::Exponential,
            Duration::from_millis(100),
            Duration::from_millis(500),
        )
        .build();
    let client = HttpClient::with_config(config).unwrap();

    assert_eq!(client.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(client.calculate_backoff(2), Duration::from_millis(400));
    assert_eq!(client.calculate_backoff(10), Duration::from_millis(500));
}

#[test]
fn test_http_client_debug() {
    let client = HttpClient::with_config(HttpClientConfig::default()).unwrap();
    let debug_str = format!("{client:?}");
    assert!(debug_str.contains("HttpClient"));
    assert!(debug_str.contains("has_rate_limiter: false"));
}
