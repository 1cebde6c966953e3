//! Refund resources

use super::binder::{check_id, Binder};
use super::params::{IterateParams, ListParams, WriteOptions};
use crate::error::Result;
use crate::http::HttpClient;
use crate::iterator::PagedIterator;
use crate::models::{CreateRefundParams, Refund};
use crate::pagination::Page;
use crate::types::StringMap;
use std::sync::Arc;

/// `/payments/{payment_id}/refunds`
#[derive(Debug)]
pub struct PaymentRefundsBinder {
    binder: Binder<Refund>,
}

impl PaymentRefundsBinder {
    pub(crate) fn new(client: Arc<HttpClient>, payment_id: &str) -> Result<Self> {
        check_id("payment_id", payment_id)?;
        Ok(Self {
            binder: Binder::new(client, format!("payments/{payment_id}/refunds"), "refunds"),
        })
    }

    /// Refund (part of) the payment
    pub async fn create(&self, params: &CreateRefundParams, options: WriteOptions) -> Result<Refund> {
        self.binder.create(params, options).await
    }

    pub async fn get(&self, id: &str) -> Result<Refund> {
        self.binder.get(id, StringMap::new()).await
    }

    pub async fn page(&self, params: ListParams) -> Result<Page<Refund>> {
        self.binder.page(params).await
    }

    pub async fn list(&self, params: ListParams) -> Result<Page<Refund>> {
        self.binder.list(params).await
    }

    pub fn iterate(&self, params: IterateParams) -> PagedIterator<Refund> {
        self.binder.iterate(params)
    }

    /// Cancel a queued or pending refund
    pub async fn delete(&self, id: &str, options: WriteOptions) -> Result<Option<Refund>> {
        self.binder.delete(id, options).await
    }

    /// Same as [`PaymentRefundsBinder::delete`]
    pub async fn cancel(&self, id: &str, options: WriteOptions) -> Result<Option<Refund>> {
        self.delete(id, options).await
    }
}
