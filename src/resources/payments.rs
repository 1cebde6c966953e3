//! Payment resources

use super::binder::{check_id, Binder};
use super::params::{IterateParams, ListParams, WriteOptions};
use crate::error::Result;
use crate::http::HttpClient;
use crate::iterator::PagedIterator;
use crate::models::{CreatePaymentParams, Payment, UpdatePaymentParams};
use crate::pagination::Page;
use crate::types::StringMap;
use std::sync::Arc;

/// `/payments`
#[derive(Debug)]
pub struct PaymentsBinder {
    binder: Binder<Payment>,
}

impl PaymentsBinder {
    pub(crate) fn new(client: Arc<HttpClient>) -> Self {
        Self {
            binder: Binder::new(client, "payments", "payments"),
        }
    }

    /// Create a payment
    pub async fn create(
        &self,
        params: &CreatePaymentParams,
        options: WriteOptions,
    ) -> Result<Payment> {
        self.binder.create(params, options).await
    }

    /// Retrieve a payment by its `tr_` identifier
    pub async fn get(&self, id: &str) -> Result<Payment> {
        self.binder.get(id, StringMap::new()).await
    }

    /// Retrieve a payment, embedding related objects (`include`/`embed`)
    pub async fn get_with_query(&self, id: &str, query: StringMap) -> Result<Payment> {
        self.binder.get(id, query).await
    }

    pub async fn page(&self, params: ListParams) -> Result<Page<Payment>> {
        self.binder.page(params).await
    }

    pub async fn list(&self, params: ListParams) -> Result<Page<Payment>> {
        self.binder.list(params).await
    }

    pub fn iterate(&self, params: IterateParams) -> PagedIterator<Payment> {
        self.binder.iterate(params)
    }

    pub async fn update(&self, id: &str, params: &UpdatePaymentParams) -> Result<Payment> {
        self.binder.update(id, params).await
    }

    /// Cancel a payment. Only payments with `is_cancelable` set can be canceled.
    pub async fn delete(&self, id: &str, options: WriteOptions) -> Result<Option<Payment>> {
        self.binder.delete(id, options).await
    }

    /// Same as [`PaymentsBinder::delete`]
    pub async fn cancel(&self, id: &str, options: WriteOptions) -> Result<Option<Payment>> {
        self.delete(id, options).await
    }
}

/// `/customers/{customer_id}/payments`
#[derive(Debug)]
pub struct CustomerPaymentsBinder {
    binder: Binder<Payment>,
}

impl CustomerPaymentsBinder {
    pub(crate) fn new(client: Arc<HttpClient>, customer_id: &str) -> Result<Self> {
        check_id("customer_id", customer_id)?;
        Ok(Self {
            binder: Binder::new(
                client,
                format!("customers/{customer_id}/payments"),
                "payments",
            ),
        })
    }

    /// Create a payment linked to the customer
    pub async fn create(
        &self,
        params: &CreatePaymentParams,
        options: WriteOptions,
    ) -> Result<Payment> {
        self.binder.create(params, options).await
    }

    pub async fn page(&self, params: ListParams) -> Result<Page<Payment>> {
        self.binder.page(params).await
    }

    pub async fn list(&self, params: ListParams) -> Result<Page<Payment>> {
        self.binder.list(params).await
    }

    pub fn iterate(&self, params: IterateParams) -> PagedIterator<Payment> {
        self.binder.iterate(params)
    }
}
