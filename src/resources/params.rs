//! Options shared by all binders

use crate::pagination::PageRequest;
use crate::types::StringMap;
use std::num::NonZeroU32;

/// Parameters of a single list request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Identifier of the first item to return
    pub from: Option<String>,
    /// Page size, clamped to 250
    pub limit: Option<u32>,
    /// Extra query parameters, e.g. `profileId` or `testmode`
    pub query: StringMap,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from(mut self, cursor: impl Into<String>) -> Self {
        self.from = Some(cursor.into());
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub(crate) fn page_request(&self) -> PageRequest {
        PageRequest {
            from: self.from.clone(),
            limit: self.limit,
        }
    }
}

/// Parameters of a lazy iteration over a whole collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IterateParams {
    /// Identifier of the first item to return
    pub from: Option<String>,
    /// Extra query parameters sent with every page request
    pub query: StringMap,
    /// Consume at most this many items per minute
    pub values_per_minute: Option<NonZeroU32>,
}

impl IterateParams {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from(mut self, cursor: impl Into<String>) -> Self {
        self.from = Some(cursor.into());
        self
    }

    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn values_per_minute(mut self, budget: NonZeroU32) -> Self {
        self.values_per_minute = Some(budget);
        self
    }
}

/// Options for requests that change state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Sent as `Idempotency-Key` instead of a generated one
    pub idempotency_key: Option<String>,
    /// Extra query parameters, e.g. `testmode`
    pub query: StringMap,
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }
}
