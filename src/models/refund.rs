//! Refunds

use super::common::{impl_resource_links, Amount, LinkMap};
use crate::types::JsonValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a refund
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefundStatus {
    Queued,
    Pending,
    Processing,
    Refunded,
    Failed,
    Canceled,
    #[serde(other)]
    Unknown,
}

/// A refund of (part of) a payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Refund {
    pub id: String,
    pub amount: Amount,
    pub status: RefundStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub metadata: Option<JsonValue>,
    pub payment_id: String,
    #[serde(default)]
    pub settlement_amount: Option<Amount>,
    #[serde(rename = "_links", default)]
    pub links: LinkMap,
}

impl Refund {
    pub fn is_queued(&self) -> bool {
        self.status == RefundStatus::Queued
    }

    pub fn is_pending(&self) -> bool {
        self.status == RefundStatus::Pending
    }

    pub fn is_processing(&self) -> bool {
        self.status == RefundStatus::Processing
    }

    pub fn is_transferred(&self) -> bool {
        self.status == RefundStatus::Refunded
    }

    pub fn is_failed(&self) -> bool {
        self.status == RefundStatus::Failed
    }

    /// Refunds can be canceled until they are sent to the bank
    pub fn is_cancelable(&self) -> bool {
        matches!(self.status, RefundStatus::Queued | RefundStatus::Pending)
    }
}

impl_resource_links!(Refund);

/// Body of `POST /payments/{id}/refunds`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRefundParams {
    pub amount: Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonValue>,
}

impl CreateRefundParams {
    pub fn new(amount: Amount) -> Self {
        Self {
            amount,
            description: None,
            metadata: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
