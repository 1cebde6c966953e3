//! Pagination types and traits
//!
//! Defines the core pagination abstractions shared by the paging client and
//! the demand-driven iterator.

use crate::error::{Error, Result};
use crate::http::DEFAULT_BASE_URL;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

/// Page size used when nothing is known about the consumer's demand
pub const DEFAULT_PAGE_SIZE: u32 = 128;

/// Largest `limit` the API accepts on list endpoints
pub const MAX_PAGE_SIZE: u32 = 250;

/// A HAL link as found in `_links`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Target URL
    pub href: String,
    /// Media type of the target
    #[serde(rename = "type", default)]
    pub media_type: String,
}

impl Link {
    /// Create a JSON HAL link
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            media_type: "application/hal+json".to_string(),
        }
    }
}

/// `_links` section of a list response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    #[serde(rename = "self", default)]
    pub self_link: Option<Link>,
    #[serde(default)]
    pub next: Option<Link>,
    #[serde(default)]
    pub previous: Option<Link>,
    #[serde(default)]
    pub documentation: Option<Link>,
}

/// Cursor and size for one list request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// Identifier of the first item to return (`from`)
    pub from: Option<String>,
    /// Number of items to return (`limit`)
    pub limit: Option<u32>,
}

impl PageRequest {
    /// Create a request for the first page
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cursor
    #[must_use]
    pub fn from(mut self, cursor: impl Into<String>) -> Self {
        self.from = Some(cursor.into());
        self
    }

    /// Set the page size
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Rebuild the request advertised by a `next`/`previous` link.
    ///
    /// A link without a `from` cursor is a malformed response, not the first
    /// page.
    pub fn from_link(link: &Link) -> Result<Self> {
        Ok(Self {
            from: Some(required_cursor(link)?),
            limit: limit_from_href(&link.href),
        })
    }
}

/// One decoded list response, before it is bound to a fetcher
#[derive(Debug, Clone)]
pub struct RawPage<T> {
    /// Items in server order
    pub items: Vec<T>,
    /// `count` as reported by the server
    pub count: Option<u32>,
    /// Continuation links
    pub links: PageLinks,
}

/// Something that can fetch one page of a remote collection.
///
/// Implemented by [`ListEndpoint`](super::ListEndpoint) for real API calls.
#[async_trait]
pub trait PageFetcher<T>: Send + Sync {
    /// Fetch the page described by `request`
    async fn fetch(&self, request: PageRequest) -> Result<RawPage<T>>;
}

/// Tracks pagination progress during iteration
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Cursor for the next fetch, `None` before the first one
    pub cursor: Option<String>,
    /// Number of pages fetched so far
    pub pages_fetched: u32,
    /// Total items fetched so far
    pub total_fetched: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no page has been requested yet
    pub fn is_first_page(&self) -> bool {
        self.pages_fetched == 0
    }

    /// Record a received page and its continuation.
    ///
    /// Only a missing `next` link ends pagination; a `next` link without a
    /// cursor is a decode error.
    pub fn record_page(&mut self, items: usize, next: Option<&Link>) -> Result<()> {
        self.pages_fetched += 1;
        self.total_fetched += items as u64;
        match next {
            Some(link) => self.cursor = Some(required_cursor(link)?),
            None => self.mark_done(),
        }
        Ok(())
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
        self.cursor = None;
    }
}

/// Extract the `from` cursor embedded in a link href
pub fn cursor_from_href(href: &str) -> Option<String> {
    query_value(href, "from")
}

/// Extract the `limit` embedded in a link href
pub fn limit_from_href(href: &str) -> Option<u32> {
    query_value(href, "limit").and_then(|v| v.parse().ok())
}

fn required_cursor(link: &Link) -> Result<String> {
    cursor_from_href(&link.href).ok_or_else(|| {
        Error::decode(format!("Pagination link has no 'from' cursor: {}", link.href))
    })
}

// Relative hrefs are resolved against the API root; only the query matters.
fn query_value(href: &str, key: &str) -> Option<String> {
    let url = match Url::parse(href) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(DEFAULT_BASE_URL).ok()?.join(href).ok()?
        }
        Err(_) => return None,
    };
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}

/// Clamp a requested page size to what the API accepts
pub fn clamp_limit(limit: u32) -> u32 {
    limit.clamp(1, MAX_PAGE_SIZE)
}
