//! Entry point tying configuration, dispatcher and binders together

use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig};
use crate::resources::{
    CustomerPaymentsBinder, CustomersBinder, PaymentRefundsBinder, PaymentsBinder,
};
use std::sync::Arc;

/// Client for the Mollie API.
///
/// Cheap to clone; all clones share one connection pool, one rate limiter
/// and one set of credentials.
///
/// ```rust,ignore
/// let client = MollieClient::from_config(&ClientConfig::from_env()?)?;
/// let payment = client.payments().get("tr_WDqYK6vllg").await?;
/// ```
#[derive(Debug, Clone)]
pub struct MollieClient {
    http: Arc<HttpClient>,
}

impl MollieClient {
    /// Client using an API key and default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::from_config(&ClientConfig::with_api_key(api_key))
    }

    /// Client from a validated configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        Self::with_http_config(config.to_http_config()?)
    }

    /// Client from a low-level HTTP configuration
    pub fn with_http_config(config: HttpClientConfig) -> Result<Self> {
        Ok(Self {
            http: Arc::new(HttpClient::with_config(config)?),
        })
    }

    /// The shared request dispatcher
    pub fn http(&self) -> &Arc<HttpClient> {
        &self.http
    }

    pub fn payments(&self) -> PaymentsBinder {
        PaymentsBinder::new(Arc::clone(&self.http))
    }

    pub fn customers(&self) -> CustomersBinder {
        CustomersBinder::new(Arc::clone(&self.http))
    }

    /// Refunds of one payment
    pub fn payment_refunds(&self, payment_id: &str) -> Result<PaymentRefundsBinder> {
        PaymentRefundsBinder::new(Arc::clone(&self.http), payment_id)
    }

    /// Payments of one customer
    pub fn customer_payments(&self, customer_id: &str) -> Result<CustomerPaymentsBinder> {
        CustomerPaymentsBinder::new(Arc::clone(&self.http), customer_id)
    }
}
