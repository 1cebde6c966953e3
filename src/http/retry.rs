//! Retry classification and idempotency keys
//!
//! One logical call moves through
//! `Attempting -> Success | RetryScheduled | PermanentFailure`.
//! This module decides which way a single physical attempt goes; the loop in
//! [`HttpClient::request`](super::HttpClient::request) owns the attempt
//! counter and the delays.

use crate::error::Error;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Method, Response};
use std::time::Duration;
use tracing::warn;
use uuid::Uuid;

/// Header carrying the idempotency key of write requests
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// Outcome of one physical attempt
#[derive(Debug)]
pub enum Attempt {
    /// 1xx-3xx answer, handed back to the caller
    Success(Response),
    /// Server fault or transport failure; may be retried
    Transient {
        error: Error,
        /// Delay requested by the server through `Retry-After`
        retry_after: Option<Duration>,
    },
    /// Client fault; never retried
    Permanent(Error),
}

impl Attempt {
    /// Classify a received response, reading the error body if any
    pub async fn from_response(response: Response) -> Self {
        let status = response.status();
        if !status.is_client_error() && !status.is_server_error() {
            return Self::Success(response);
        }

        let retry_after = retry_after(response.headers());
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Could not read {} error body: {}", status, e);
                String::new()
            }
        };
        let error = Error::from_response_body(status.as_u16(), &body);

        if status.is_server_error() {
            Self::Transient { error, retry_after }
        } else {
            Self::Permanent(error)
        }
    }

    /// Classify a request that never produced a response
    pub fn from_transport_error(error: reqwest::Error, timeout: Duration) -> Self {
        if error.is_builder() {
            return Self::Permanent(Error::Http(error));
        }

        let error = if error.is_timeout() {
            Error::Timeout {
                timeout_ms: timeout.as_millis() as u64,
            }
        } else {
            Error::Http(error)
        };

        Self::Transient {
            error,
            retry_after: None,
        }
    }
}

/// Parse a `Retry-After` header given in seconds
pub fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

/// Whether requests with this method get an idempotency key by default
pub fn requires_idempotency_key(method: &Method) -> bool {
    *method == Method::POST || *method == Method::DELETE
}

/// Generate a fresh idempotency key
pub fn new_idempotency_key() -> String {
    Uuid::new_v4().to_string()
}

/// Key to send with every attempt of one logical call.
///
/// A caller-supplied key always wins; otherwise POST and DELETE get a new one.
pub fn idempotency_key_for(method: &Method, supplied: Option<&str>) -> Option<String> {
    match supplied {
        Some(key) => Some(key.to_string()),
        None if requires_idempotency_key(method) => Some(new_idempotency_key()),
        None => None,
    }
}
