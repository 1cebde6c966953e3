//! Composable stages over a [`DemandIterator`]

use super::demand::Demand;
use super::DemandIterator;
use crate::error::Result;
use async_trait::async_trait;
use std::fmt;
use std::future::Future;

/// Yields at most `n` items, then stops pulling upstream
pub struct Take<I> {
    inner: I,
    remaining: usize,
}

impl<I: DemandIterator> Take<I> {
    pub(super) fn new(mut inner: I, n: usize) -> Self {
        inner.hint_demand(Demand::Bounded(n));
        Self {
            inner,
            remaining: n,
        }
    }
}

#[async_trait]
impl<I: DemandIterator> DemandIterator for Take<I> {
    type Item = I::Item;

    async fn next(&mut self) -> Result<Option<I::Item>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        let item = self.inner.next().await?;
        match item {
            Some(_) => self.remaining -= 1,
            None => self.remaining = 0,
        }
        Ok(item)
    }

    fn hint_demand(&mut self, demand: Demand) {
        self.inner
            .hint_demand(demand.capped(Demand::Bounded(self.remaining)));
    }
}

/// Discards the first `n` items
pub struct Skip<I> {
    inner: I,
    remaining: usize,
}

impl<I: DemandIterator> Skip<I> {
    pub(super) fn new(inner: I, n: usize) -> Self {
        Self {
            inner,
            remaining: n,
        }
    }
}

#[async_trait]
impl<I: DemandIterator> DemandIterator for Skip<I> {
    type Item = I::Item;

    async fn next(&mut self) -> Result<Option<I::Item>> {
        while self.remaining > 0 {
            if self.inner.next().await?.is_none() {
                self.remaining = 0;
                return Ok(None);
            }
            self.remaining -= 1;
        }
        self.inner.next().await
    }

    fn hint_demand(&mut self, demand: Demand) {
        self.inner.hint_demand(demand.plus(self.remaining));
    }
}

/// Keeps items matching a synchronous predicate
pub struct Filter<I, P> {
    inner: I,
    predicate: P,
}

impl<I, P> Filter<I, P> {
    pub(super) fn new(inner: I, predicate: P) -> Self {
        Self { inner, predicate }
    }
}

#[async_trait]
impl<I, P> DemandIterator for Filter<I, P>
where
    I: DemandIterator,
    P: FnMut(&I::Item) -> bool + Send,
{
    type Item = I::Item;

    async fn next(&mut self) -> Result<Option<I::Item>> {
        while let Some(item) = self.inner.next().await? {
            if (self.predicate)(&item) {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }

    fn hint_demand(&mut self, _demand: Demand) {
        // Any number of upstream items may be rejected
        self.inner.hint_demand(Demand::Unbounded);
    }
}

/// Keeps items matching an asynchronous predicate.
///
/// The predicate receives a reference but its future must not borrow from
/// it; clone what the future needs.
pub struct FilterAsync<I, P> {
    inner: I,
    predicate: P,
}

impl<I, P> FilterAsync<I, P> {
    pub(super) fn new(inner: I, predicate: P) -> Self {
        Self { inner, predicate }
    }
}

#[async_trait]
impl<I, P, Fut> DemandIterator for FilterAsync<I, P>
where
    I: DemandIterator,
    P: FnMut(&I::Item) -> Fut + Send,
    Fut: Future<Output = bool> + Send,
{
    type Item = I::Item;

    async fn next(&mut self) -> Result<Option<I::Item>> {
        while let Some(item) = self.inner.next().await? {
            if (self.predicate)(&item).await {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }

    fn hint_demand(&mut self, _demand: Demand) {
        self.inner.hint_demand(Demand::Unbounded);
    }
}

/// Transforms items with a synchronous function
pub struct Map<I, F> {
    inner: I,
    f: F,
}

impl<I, F> Map<I, F> {
    pub(super) fn new(inner: I, f: F) -> Self {
        Self { inner, f }
    }
}

#[async_trait]
impl<I, F, U> DemandIterator for Map<I, F>
where
    I: DemandIterator,
    F: FnMut(I::Item) -> U + Send,
    U: Send,
{
    type Item = U;

    async fn next(&mut self) -> Result<Option<U>> {
        Ok(self.inner.next().await?.map(&mut self.f))
    }

    fn hint_demand(&mut self, demand: Demand) {
        self.inner.hint_demand(demand);
    }
}

/// Transforms items with an asynchronous function
pub struct Then<I, F> {
    inner: I,
    f: F,
}

impl<I, F> Then<I, F> {
    pub(super) fn new(inner: I, f: F) -> Self {
        Self { inner, f }
    }
}

#[async_trait]
impl<I, F, Fut> DemandIterator for Then<I, F>
where
    I: DemandIterator,
    F: FnMut(I::Item) -> Fut + Send,
    Fut: Future + Send,
    Fut::Output: Send,
{
    type Item = Fut::Output;

    async fn next(&mut self) -> Result<Option<Fut::Output>> {
        match self.inner.next().await? {
            Some(item) => Ok(Some((self.f)(item).await)),
            None => Ok(None),
        }
    }

    fn hint_demand(&mut self, demand: Demand) {
        self.inner.hint_demand(demand);
    }
}

macro_rules! impl_debug {
    ($name:ident, $($field:ident),*) => {
        impl<I: fmt::Debug, $($field),*> fmt::Debug for $name<I, $($field),*> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("inner", &self.inner)
                    .finish_non_exhaustive()
            }
        }
    };
}

impl_debug!(Filter, P);
impl_debug!(FilterAsync, P);
impl_debug!(Map, F);
impl_debug!(Then, F);

impl<I: fmt::Debug> fmt::Debug for Take<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Take")
            .field("inner", &self.inner)
            .field("remaining", &self.remaining)
            .finish()
    }
}

impl<I: fmt::Debug> fmt::Debug for Skip<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Skip")
            .field("inner", &self.inner)
            .field("remaining", &self.remaining)
            .finish()
    }
}
