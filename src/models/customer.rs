//! Customers

use super::common::{impl_resource_links, LinkMap};
use crate::types::{JsonValue, Mode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A customer as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub mode: Mode,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub metadata: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "_links", default)]
    pub links: LinkMap,
}

impl_resource_links!(Customer);

/// Body of `POST /customers`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonValue>,
}

impl CreateCustomerParams {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Body of `PATCH /customers/{id}`; same fields as creation, all optional
pub type UpdateCustomerParams = CreateCustomerParams;
