//! Demand-driven iterator module
//!
//! Lazy, pull-based iteration over paginated collections.
//!
//! # Overview
//!
//! - [`PagedIterator`] is the source: it owns the cursor and a one-page buffer
//! - [`DemandIteratorExt`] adds `take`, `skip`, `filter`, `map`, ... on top
//! - [`Demand`] flows from the outermost stage down to the source so the
//!   first page request can be sized to what the chain will actually consume
//!
//! ```text
//! source.skip(10).take(80)
//!
//!   Take(80) --Bounded(80)--> Skip(10) --Bounded(90)--> PagedIterator
//!                                                       GET ?limit=90
//! ```
//!
//! Composition never performs I/O; the first page is requested by the first
//! `next()` call that finds the buffer empty.

mod adapters;
mod demand;
mod source;
mod throttle;

pub use adapters::{Filter, FilterAsync, Map, Skip, Take, Then};
pub use demand::{Demand, PagePlan};
pub use source::PagedIterator;
pub use throttle::Throttle;

use crate::error::Result;
use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use std::future::Future;

/// An asynchronous, fallible, pull-based sequence.
///
/// `next` returns `Ok(None)` once the sequence is done and keeps doing so on
/// every later call.
#[async_trait]
pub trait DemandIterator: Send {
    type Item: Send;

    /// Pull the next item
    async fn next(&mut self) -> Result<Option<Self::Item>>;

    /// Tell this stage how many items its consumer will pull at most.
    ///
    /// Stages translate the hint and forward it upstream; the source uses
    /// it to size page requests.
    fn hint_demand(&mut self, demand: Demand);
}

/// Combinators and terminal consumers for every [`DemandIterator`]
#[async_trait]
pub trait DemandIteratorExt: DemandIterator + Sized {
    /// Yield at most `n` items
    fn take(self, n: usize) -> Take<Self> {
        Take::new(self, n)
    }

    /// Discard the first `n` items
    fn skip(self, n: usize) -> Skip<Self> {
        Skip::new(self, n)
    }

    /// Keep items for which `predicate` returns true
    fn filter<P>(self, predicate: P) -> Filter<Self, P>
    where
        P: FnMut(&Self::Item) -> bool + Send,
    {
        Filter::new(self, predicate)
    }

    /// Keep items for which the future returned by `predicate` resolves to true
    fn filter_async<P, Fut>(self, predicate: P) -> FilterAsync<Self, P>
    where
        P: FnMut(&Self::Item) -> Fut + Send,
        Fut: Future<Output = bool> + Send,
    {
        FilterAsync::new(self, predicate)
    }

    /// Transform every item
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        F: FnMut(Self::Item) -> U + Send,
        U: Send,
    {
        Map::new(self, f)
    }

    /// Transform every item asynchronously
    fn then<F, Fut>(self, f: F) -> Then<Self, F>
    where
        F: FnMut(Self::Item) -> Fut + Send,
        Fut: Future + Send,
        Fut::Output: Send,
    {
        Then::new(self, f)
    }

    /// Call `f` on every item until the sequence is done
    async fn for_each<F>(mut self, mut f: F) -> Result<()>
    where
        F: FnMut(Self::Item) + Send,
    {
        while let Some(item) = self.next().await? {
            f(item);
        }
        Ok(())
    }

    /// Whether every item satisfies `predicate`; stops at the first miss
    async fn all<P>(&mut self, mut predicate: P) -> Result<bool>
    where
        P: FnMut(Self::Item) -> bool + Send,
    {
        while let Some(item) = self.next().await? {
            if !predicate(item) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Whether any item satisfies `predicate`; stops at the first hit
    async fn any<P>(&mut self, mut predicate: P) -> Result<bool>
    where
        P: FnMut(Self::Item) -> bool + Send,
    {
        while let Some(item) = self.next().await? {
            if predicate(item) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// First item satisfying `predicate`
    async fn find<P>(&mut self, mut predicate: P) -> Result<Option<Self::Item>>
    where
        P: FnMut(&Self::Item) -> bool + Send,
    {
        while let Some(item) = self.next().await? {
            if predicate(&item) {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }

    /// Gather every remaining item
    async fn collect(mut self) -> Result<Vec<Self::Item>> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }

    /// Adapt into a [`futures::Stream`].
    ///
    /// A failure is yielded once as `Err`; the stream ends after it.
    fn into_stream<'a>(self) -> BoxStream<'a, Result<Self::Item>>
    where
        Self: 'a,
    {
        stream::unfold(Some(self), |state| async move {
            let mut iter = state?;
            match iter.next().await {
                Ok(Some(item)) => Some((Ok(item), Some(iter))),
                Ok(None) => None,
                Err(e) => Some((Err(e), None)),
            }
        })
        .boxed()
    }
}

impl<I: DemandIterator> DemandIteratorExt for I {}

#[cfg(test)]
mod tests;
