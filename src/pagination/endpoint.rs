//! Paging client for list endpoints
//!
//! Turns a cursor and a page size into one GET against a list endpoint and
//! unwraps the HAL envelope:
//!
//! ```text
//! { "count": 2, "_embedded": { "payments": [ ... ] }, "_links": { "next": { "href": ... } } }
//! ```

use super::page::Page;
use super::types::{clamp_limit, PageFetcher, PageLinks, PageRequest, RawPage};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::iterator::PagedIterator;
use crate::types::{JsonObject, StringMap};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// Envelope of every list response
#[derive(Debug, Deserialize)]
struct ListEnvelope {
    #[serde(default)]
    count: Option<u32>,
    #[serde(rename = "_embedded", default)]
    embedded: Option<JsonObject>,
    #[serde(rename = "_links", default)]
    links: PageLinks,
}

impl ListEnvelope {
    fn into_raw_page<T: DeserializeOwned>(self, key: &str) -> Result<RawPage<T>> {
        let collection = self
            .embedded
            .and_then(|mut embedded| embedded.remove(key))
            .ok_or_else(|| {
                Error::decode(format!("list response has no '_embedded.{key}' collection"))
            })?;

        let items: Vec<T> = serde_json::from_value(collection)
            .map_err(|e| Error::decode(format!("invalid '{key}' item: {e}")))?;

        Ok(RawPage {
            items,
            count: self.count,
            links: self.links,
        })
    }
}

/// One list endpoint: path, embedded collection key and fixed query
pub struct ListEndpoint<T> {
    client: Arc<HttpClient>,
    path: String,
    embedded_key: String,
    query: StringMap,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ListEndpoint<T> {
    /// Create an endpoint for `path`, unwrapping `_embedded.<embedded_key>`
    pub fn new(
        client: Arc<HttpClient>,
        path: impl Into<String>,
        embedded_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            path: path.into(),
            embedded_key: embedded_key.into(),
            query: StringMap::new(),
            _marker: PhantomData,
        }
    }

    /// Add query parameters sent with every page request
    #[must_use]
    pub fn with_query(mut self, query: StringMap) -> Self {
        self.query.extend(query);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl<T: DeserializeOwned + Send + 'static> ListEndpoint<T> {
    /// Fetch one page, bound to this endpoint for `next_page`/`previous_page`
    pub async fn page(self: &Arc<Self>, request: PageRequest) -> Result<Page<T>> {
        let raw = self.fetch(request).await?;
        Ok(Page::new(raw, Arc::clone(self) as Arc<dyn PageFetcher<T>>))
    }

    /// Lazily iterate over the whole collection
    pub fn iterate(self: Arc<Self>) -> PagedIterator<T> {
        PagedIterator::new(self)
    }
}

#[async_trait]
impl<T: DeserializeOwned + Send + 'static> PageFetcher<T> for ListEndpoint<T> {
    async fn fetch(&self, request: PageRequest) -> Result<RawPage<T>> {
        let mut config = RequestConfig::new().queries(self.query.clone());
        if let Some(from) = request.from {
            config = config.query("from", from);
        }
        if let Some(limit) = request.limit {
            config = config.query("limit", clamp_limit(limit).to_string());
        }

        debug!(
            "Fetching page of {} (from: {:?}, limit: {:?})",
            self.path,
            config.query.get("from"),
            config.query.get("limit")
        );

        let envelope: ListEnvelope = self
            .client
            .get_json_with_config(&self.path, config)
            .await?;
        envelope.into_raw_page(&self.embedded_key)
    }
}

impl<T> fmt::Debug for ListEndpoint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListEndpoint")
            .field("path", &self.path)
            .field("embedded_key", &self.embedded_key)
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}
