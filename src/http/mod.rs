//! HTTP client module
//!
//! Provides the request dispatcher with retry, idempotency and rate limiting.
//!
//! # Features
//!
//! - **Automatic Retries**: server faults and transport failures, up to a ceiling
//! - **Retry-After**: server-provided delays override the configured backoff
//! - **Idempotency Keys**: one key per logical write, repeated on every attempt
//! - **Rate Limiting**: optional token bucket rate limiter using governor

mod client;
mod rate_limit;
mod retry;

pub use client::{
    HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig, DEFAULT_BASE_URL,
};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use retry::{
    idempotency_key_for, new_idempotency_key, requires_idempotency_key, retry_after, Attempt,
    IDEMPOTENCY_KEY_HEADER,
};

#[cfg(test)]
mod tests;
