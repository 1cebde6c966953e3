//! Client configuration
//!
//! [`ClientConfig`] is what a program hands to
//! [`MollieClient::from_config`](crate::MollieClient::from_config). It can be
//! built in code, loaded from YAML or JSON, or read from the environment:
//!
//! ```yaml
//! api_key: test_dHar4XY7LxsDOtmnkVtjNVWXLSlXsM
//! http:
//!   timeout_seconds: 10
//!   max_retries: 2
//!   retry_delay_ms: 2000
//!   rate_limit:
//!     requests_per_second: 20
//! ```

use crate::auth::Credentials;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig, DEFAULT_BASE_URL};
use crate::types::{BackoffType, StringMap};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Environment variable holding an API key
pub const ENV_API_KEY: &str = "MOLLIE_API_KEY";

/// Environment variable holding an OAuth access token
pub const ENV_ACCESS_TOKEN: &str = "MOLLIE_ACCESS_TOKEN";

/// Environment variable overriding the API endpoint
pub const ENV_API_ENDPOINT: &str = "MOLLIE_API_ENDPOINT";

// ============================================================================
// Client Config
// ============================================================================

/// Everything needed to construct a client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API key (`test_...` or `live_...`)
    #[serde(default)]
    pub api_key: Option<String>,

    /// OAuth access token (`access_...`)
    #[serde(default)]
    pub access_token: Option<String>,

    /// Base URL of the API
    #[serde(default = "default_api_endpoint")]
    pub api_endpoint: String,

    /// Extra `name/version` entries appended to the user agent
    #[serde(default)]
    pub version_strings: Vec<String>,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: StringMap,

    /// HTTP behaviour
    #[serde(default)]
    pub http: HttpConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            access_token: None,
            api_endpoint: default_api_endpoint(),
            version_strings: Vec::new(),
            headers: StringMap::new(),
            http: HttpConfig::default(),
        }
    }
}

fn default_api_endpoint() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl ClientConfig {
    /// Config authenticating with an API key
    pub fn with_api_key(key: impl Into<String>) -> Self {
        Self {
            api_key: Some(key.into()),
            ..Self::default()
        }
    }

    /// Config authenticating with an OAuth access token
    pub fn with_access_token(token: impl Into<String>) -> Self {
        Self {
            access_token: Some(token.into()),
            ..Self::default()
        }
    }

    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::Io(e)
            }
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    /// Read `MOLLIE_API_KEY`, `MOLLIE_ACCESS_TOKEN` and `MOLLIE_API_ENDPOINT`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut config = Self {
            api_key: non_empty(ENV_API_KEY),
            access_token: non_empty(ENV_ACCESS_TOKEN),
            ..Self::default()
        };
        if let Some(endpoint) = non_empty(ENV_API_ENDPOINT) {
            config.api_endpoint = endpoint;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the config can produce a working client
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_some() && self.access_token.is_some() {
            return Err(Error::config(
                "Set either api_key or access_token, not both",
            ));
        }
        if self.api_endpoint.trim().is_empty() {
            return Err(Error::missing_field("api_endpoint"));
        }
        url::Url::parse(&self.api_endpoint)
            .map_err(|e| Error::invalid_value("api_endpoint", e.to_string()))?;
        self.http.validate()?;
        self.credentials().map(|_| ())
    }

    /// Validated credentials, if any were configured
    pub fn credentials(&self) -> Result<Option<Credentials>> {
        match (&self.api_key, &self.access_token) {
            (Some(key), _) => Credentials::api_key(key.as_str()).map(Some),
            (None, Some(token)) => Credentials::access_token(token.as_str()).map(Some),
            (None, None) => Ok(None),
        }
    }

    /// User agent including the configured version strings
    pub fn user_agent(&self) -> String {
        let mut agent = HttpClientConfig::default().user_agent;
        for version in &self.version_strings {
            agent.push(' ');
            agent.push_str(version.trim());
        }
        agent
    }

    /// Convert into the HTTP client configuration
    pub fn to_http_config(&self) -> Result<HttpClientConfig> {
        let mut builder = HttpClientConfig::builder()
            .base_url(self.api_endpoint.clone())
            .timeout(Duration::from_secs(self.http.timeout_seconds))
            .max_retries(self.http.max_retries)
            .backoff(
                self.http.backoff_type,
                Duration::from_millis(self.http.retry_delay_ms),
                Duration::from_millis(self.http.max_backoff_ms),
            )
            .user_agent(self.user_agent());

        for (key, value) in &self.headers {
            builder = builder.header(key.clone(), value.clone());
        }
        if let Some(rate_limit) = &self.http.rate_limit {
            builder = builder.rate_limit(rate_limit.clone());
        }
        if let Some(credentials) = self.credentials()? {
            builder = builder.credentials(credentials);
        }

        Ok(builder.build())
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// Retry, timeout and rate-limit settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Retries after the first attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay before a retry when the server sends no `Retry-After`
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// How the retry delay grows
    #[serde(default)]
    pub backoff_type: BackoffType,

    /// Upper bound for a grown retry delay
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,

    /// Client-side request rate limit
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            backoff_type: BackoffType::default(),
            max_backoff_ms: default_max_backoff_ms(),
            rate_limit: None,
        }
    }
}

impl HttpConfig {
    fn validate(&self) -> Result<()> {
        if self.timeout_seconds == 0 {
            return Err(Error::invalid_value(
                "http.timeout_seconds",
                "must be greater than zero",
            ));
        }
        if let Some(rate_limit) = &self.rate_limit {
            if rate_limit.requests_per_second == 0 {
                return Err(Error::invalid_value(
                    "http.rate_limit.requests_per_second",
                    "must be greater than zero",
                ));
            }
        }
        Ok(())
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    2
}

fn default_retry_delay_ms() -> u64 {
    2000
}

fn default_max_backoff_ms() -> u64 {
    60000
}
