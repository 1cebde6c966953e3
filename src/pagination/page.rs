//! A single page of a list response

use super::types::{cursor_from_href, Link, PageFetcher, PageLinks, PageRequest, RawPage};
use crate::error::Result;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// One page of a remote collection.
///
/// Immutable once returned. `next_page` and `previous_page` go back through
/// the fetcher that produced this page, so they share its retry policy and
/// base query.
pub struct Page<T> {
    items: Vec<T>,
    reported_count: Option<u32>,
    links: PageLinks,
    fetcher: Arc<dyn PageFetcher<T>>,
}

impl<T> Page<T> {
    /// Bind a decoded page to the fetcher that produced it
    pub fn new(raw: RawPage<T>, fetcher: Arc<dyn PageFetcher<T>>) -> Self {
        Self {
            items: raw.items,
            reported_count: raw.count,
            links: raw.links,
            fetcher,
        }
    }

    /// Items on this page, in server order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page, keeping only its items
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Number of items on this page.
    ///
    /// Counts the items actually received; see [`Page::reported_count`] for
    /// the server's own figure.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// `count` as reported by the server
    pub fn reported_count(&self) -> Option<u32> {
        self.reported_count
    }

    /// Continuation links
    pub fn links(&self) -> &PageLinks {
        &self.links
    }

    /// Cursor of the next page, if there is one
    pub fn next_page_cursor(&self) -> Option<String> {
        self.links
            .next
            .as_ref()
            .and_then(|link| cursor_from_href(&link.href))
    }

    /// Cursor of the previous page, if there is one
    pub fn previous_page_cursor(&self) -> Option<String> {
        self.links
            .previous
            .as_ref()
            .and_then(|link| cursor_from_href(&link.href))
    }

    pub fn has_next_page(&self) -> bool {
        self.links.next.is_some()
    }

    pub fn has_previous_page(&self) -> bool {
        self.links.previous.is_some()
    }

    /// Fetch the page after this one; `Ok(None)` if this is the last page.
    ///
    /// Fails with [`Error::Decode`](crate::Error::Decode) when the `next`
    /// link carries no cursor.
    pub async fn next_page(&self) -> Result<Option<Page<T>>> {
        self.follow(self.links.next.as_ref()).await
    }

    /// Fetch the page before this one; `Ok(None)` if this is the first page
    pub async fn previous_page(&self) -> Result<Option<Page<T>>> {
        self.follow(self.links.previous.as_ref()).await
    }

    async fn follow(&self, link: Option<&Link>) -> Result<Option<Page<T>>> {
        let Some(link) = link else {
            return Ok(None);
        };
        let raw = self.fetcher.fetch(PageRequest::from_link(link)?).await?;
        Ok(Some(Page::new(raw, Arc::clone(&self.fetcher))))
    }
}

impl<T> Deref for Page<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for Page<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("items", &self.items)
            .field("reported_count", &self.reported_count)
            .field("links", &self.links)
            .finish_non_exhaustive()
    }
}
