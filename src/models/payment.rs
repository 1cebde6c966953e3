//! Payments

use super::common::{impl_resource_links, Amount, LinkMap, ResourceLinks};
use crate::types::{JsonValue, Mode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Open,
    Canceled,
    Pending,
    Authorized,
    Expired,
    Failed,
    Paid,
    /// A status this client does not know yet
    #[serde(other)]
    Unknown,
}

/// A payment as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub mode: Mode,
    pub created_at: DateTime<Utc>,
    pub status: PaymentStatus,
    #[serde(default)]
    pub is_cancelable: Option<bool>,
    pub amount: Amount,
    #[serde(default)]
    pub amount_refunded: Option<Amount>,
    #[serde(default)]
    pub amount_remaining: Option<Amount>,
    pub description: String,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub metadata: Option<JsonValue>,
    #[serde(default)]
    pub redirect_url: Option<String>,
    #[serde(default)]
    pub webhook_url: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub canceled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expired_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub failed_at: Option<DateTime<Utc>>,
    #[serde(rename = "_links", default)]
    pub links: LinkMap,
}

impl Payment {
    pub fn is_open(&self) -> bool {
        self.status == PaymentStatus::Open
    }

    pub fn is_pending(&self) -> bool {
        self.status == PaymentStatus::Pending
    }

    pub fn is_authorized(&self) -> bool {
        self.status == PaymentStatus::Authorized
    }

    /// Whether the payment has been paid at some point.
    ///
    /// Stays true after (partial) refunds, unlike a `Paid` status check.
    pub fn is_paid(&self) -> bool {
        self.paid_at.is_some()
    }

    pub fn is_canceled(&self) -> bool {
        self.status == PaymentStatus::Canceled
    }

    pub fn is_expired(&self) -> bool {
        self.status == PaymentStatus::Expired
    }

    pub fn is_failed(&self) -> bool {
        self.status == PaymentStatus::Failed
    }

    pub fn is_cancelable(&self) -> bool {
        self.is_cancelable.unwrap_or(false)
    }

    /// Hosted checkout page the customer should be redirected to
    pub fn checkout_url(&self) -> Option<&str> {
        self.link_href("checkout")
    }

    pub fn has_refunds(&self) -> bool {
        self.link("refunds").is_some()
    }

    pub fn has_chargebacks(&self) -> bool {
        self.link("chargebacks").is_some()
    }
}

impl_resource_links!(Payment);

/// Body of `POST /payments`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentParams {
    pub amount: Amount,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
}

impl CreatePaymentParams {
    pub fn new(amount: Amount, description: impl Into<String>) -> Self {
        Self {
            amount,
            description: description.into(),
            redirect_url: None,
            cancel_url: None,
            webhook_url: None,
            locale: None,
            method: None,
            metadata: None,
            customer_id: None,
        }
    }

    #[must_use]
    pub fn redirect_url(mut self, url: impl Into<String>) -> Self {
        self.redirect_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn cancel_url(mut self, url: impl Into<String>) -> Self {
        self.cancel_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    #[must_use]
    pub fn metadata(mut self, metadata: JsonValue) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Body of `PATCH /payments/{id}`; only set fields are sent
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}
