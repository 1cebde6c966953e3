//! Generic CRUD binder over one collection path

use super::params::{IterateParams, ListParams, WriteOptions};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::iterator::PagedIterator;
use crate::pagination::{ListEndpoint, Page};
use crate::types::StringMap;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Operations on one collection, e.g. `payments` or `customers/{id}/payments`.
///
/// Every request goes through the shared [`HttpClient`], so retries,
/// idempotency keys and rate limiting apply uniformly.
pub struct Binder<T> {
    client: Arc<HttpClient>,
    path: String,
    embedded_key: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned + Send + 'static> Binder<T> {
    pub fn new(
        client: Arc<HttpClient>,
        path: impl Into<String>,
        embedded_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            path: path.into(),
            embedded_key: embedded_key.into(),
            _marker: PhantomData,
        }
    }

    /// Collection path relative to the base URL
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Create a resource
    pub async fn create<P: Serialize + ?Sized>(
        &self,
        params: &P,
        options: WriteOptions,
    ) -> Result<T> {
        let config = write_config(options).json(serde_json::to_value(params)?);
        self.client
            .request_json(Method::POST, &self.path, config)
            .await
    }

    /// Retrieve a single resource
    pub async fn get(&self, id: &str, query: StringMap) -> Result<T> {
        let path = self.item_path(id)?;
        let config = RequestConfig::new().queries(query);
        self.client.get_json_with_config(&path, config).await
    }

    /// Retrieve one page of the collection
    pub async fn page(&self, params: ListParams) -> Result<Page<T>> {
        let request = params.page_request();
        self.endpoint(params.query).page(request).await
    }

    /// Same as [`Binder::page`]
    pub async fn list(&self, params: ListParams) -> Result<Page<T>> {
        self.page(params).await
    }

    /// Lazily iterate over the whole collection.
    ///
    /// No request is made until the iterator is first pulled.
    pub fn iterate(&self, params: IterateParams) -> PagedIterator<T> {
        let mut iter = self.endpoint(params.query).iterate();
        if let Some(from) = params.from {
            iter = iter.starting_from(from);
        }
        if let Some(budget) = params.values_per_minute {
            iter = iter.with_throttle(budget);
        }
        iter
    }

    /// Update a resource; only the fields set in `params` change
    pub async fn update<P: Serialize + ?Sized>(&self, id: &str, params: &P) -> Result<T> {
        let path = self.item_path(id)?;
        let config = RequestConfig::new().json(serde_json::to_value(params)?);
        self.client
            .request_json(Method::PATCH, &path, config)
            .await
    }

    /// Delete (or cancel) a resource.
    ///
    /// Returns the resource in its new state, or `None` when the API answers
    /// `204 No Content`.
    pub async fn delete(&self, id: &str, options: WriteOptions) -> Result<Option<T>> {
        let path = self.item_path(id)?;
        self.client
            .request_optional_json(Method::DELETE, &path, write_config(options))
            .await
    }

    fn endpoint(&self, query: StringMap) -> Arc<ListEndpoint<T>> {
        Arc::new(
            ListEndpoint::new(
                Arc::clone(&self.client),
                self.path.clone(),
                self.embedded_key.clone(),
            )
            .with_query(query),
        )
    }

    fn item_path(&self, id: &str) -> Result<String> {
        check_id("id", id)?;
        Ok(format!("{}/{}", self.path, id))
    }
}

fn write_config(options: WriteOptions) -> RequestConfig {
    let mut config = RequestConfig::new().queries(options.query);
    if let Some(key) = options.idempotency_key {
        config = config.idempotency_key(key);
    }
    config
}

/// Reject identifiers that would change the request path
pub(crate) fn check_id(name: &str, id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(Error::invalid_argument(name, "must not be empty"));
    }
    if id.contains(['/', '?', '#']) {
        return Err(Error::invalid_argument(
            name,
            format!("'{id}' is not a valid identifier"),
        ));
    }
    Ok(())
}

impl<T> fmt::Debug for Binder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binder")
            .field("path", &self.path)
            .field("embedded_key", &self.embedded_key)
            .finish_non_exhaustive()
    }
}
