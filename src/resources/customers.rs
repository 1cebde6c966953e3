//! Customer resources

use super::binder::Binder;
use super::params::{IterateParams, ListParams, WriteOptions};
use crate::error::Result;
use crate::http::HttpClient;
use crate::iterator::PagedIterator;
use crate::models::{CreateCustomerParams, Customer, UpdateCustomerParams};
use crate::pagination::Page;
use crate::types::StringMap;
use std::sync::Arc;

/// `/customers`
#[derive(Debug)]
pub struct CustomersBinder {
    binder: Binder<Customer>,
}

impl CustomersBinder {
    pub(crate) fn new(client: Arc<HttpClient>) -> Self {
        Self {
            binder: Binder::new(client, "customers", "customers"),
        }
    }

    pub async fn create(
        &self,
        params: &CreateCustomerParams,
        options: WriteOptions,
    ) -> Result<Customer> {
        self.binder.create(params, options).await
    }

    pub async fn get(&self, id: &str) -> Result<Customer> {
        self.binder.get(id, StringMap::new()).await
    }

    pub async fn page(&self, params: ListParams) -> Result<Page<Customer>> {
        self.binder.page(params).await
    }

    pub async fn list(&self, params: ListParams) -> Result<Page<Customer>> {
        self.binder.list(params).await
    }

    pub fn iterate(&self, params: IterateParams) -> PagedIterator<Customer> {
        self.binder.iterate(params)
    }

    pub async fn update(&self, id: &str, params: &UpdateCustomerParams) -> Result<Customer> {
        self.binder.update(id, params).await
    }

    /// Delete a customer; the API answers with an empty body
    pub async fn delete(&self, id: &str, options: WriteOptions) -> Result<Option<Customer>> {
        self.binder.delete(id, options).await
    }
}
