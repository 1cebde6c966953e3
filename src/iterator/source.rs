//! The paging source at the bottom of every iterator chain

use super::demand::{Demand, PagePlan};
use super::throttle::Throttle;
use super::DemandIterator;
use crate::error::Result;
use crate::pagination::{PageFetcher, PageRequest, PaginationState};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::{debug, warn};

/// Lazily walks a remote collection one page at a time.
///
/// Nothing is fetched until the first call to [`next`](DemandIterator::next).
/// The page size is derived from the [`Demand`] hinted by the adapters
/// stacked on top, frozen when the first page is requested.
pub struct PagedIterator<T> {
    fetcher: Arc<dyn PageFetcher<T>>,
    state: PaginationState,
    buffer: VecDeque<T>,
    demand: Demand,
    plan: Option<PagePlan>,
    throttle: Option<Throttle>,
}

impl<T: Send + 'static> PagedIterator<T> {
    /// Iterate from the start of the collection
    pub fn new(fetcher: Arc<dyn PageFetcher<T>>) -> Self {
        Self {
            fetcher,
            state: PaginationState::new(),
            buffer: VecDeque::new(),
            demand: Demand::Unbounded,
            plan: None,
            throttle: None,
        }
    }

    /// Start at the item with the given identifier
    #[must_use]
    pub fn starting_from(mut self, cursor: impl Into<String>) -> Self {
        self.state.cursor = Some(cursor.into());
        self
    }

    /// Consume at most `values_per_minute` items per minute
    #[must_use]
    pub fn with_throttle(mut self, values_per_minute: NonZeroU32) -> Self {
        self.throttle = Some(Throttle::new(values_per_minute));
        self
    }

    /// Demand currently in effect
    pub fn demand(&self) -> Demand {
        self.demand
    }

    /// Pages fetched so far
    pub fn pages_fetched(&self) -> u32 {
        self.state.pages_fetched
    }

    /// Whether the end of the collection has been reached
    pub fn is_exhausted(&self) -> bool {
        self.state.done && self.buffer.is_empty()
    }

    async fn fetch_page(&mut self) -> Result<()> {
        let demand = self.demand;
        let plan = self.plan.get_or_insert_with(|| PagePlan::new(demand));
        let mut request = PageRequest::new().limit(plan.next_limit());
        if let Some(cursor) = &self.state.cursor {
            request = request.from(cursor.clone());
        }

        if let Some(throttle) = &self.throttle {
            throttle.wait().await;
        }

        debug!(
            "Fetching page {} (from: {:?}, limit: {:?}, demand: {:?})",
            self.state.pages_fetched + 1,
            request.from,
            request.limit,
            demand
        );

        let page = match self.fetcher.fetch(request).await {
            Ok(page) => page,
            Err(e) => {
                warn!("Page fetch failed, stopping iteration: {}", e);
                self.state.mark_done();
                return Err(e);
            }
        };

        let received = page.items.len();
        plan.record(received);
        if let Some(throttle) = self.throttle.as_mut() {
            throttle.record(received);
        }
        if let Err(e) = self.state.record_page(received, page.links.next.as_ref()) {
            warn!("Malformed page, stopping iteration: {}", e);
            self.state.mark_done();
            return Err(e);
        }
        self.buffer.extend(page.items);

        if self.state.done {
            debug!(
                "Reached end of collection after {} pages ({} items)",
                self.state.pages_fetched, self.state.total_fetched
            );
        }
        Ok(())
    }
}

#[async_trait]
impl<T: Send + 'static> DemandIterator for PagedIterator<T> {
    type Item = T;

    async fn next(&mut self) -> Result<Option<T>> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Ok(Some(item));
            }
            if self.state.done {
                return Ok(None);
            }
            self.fetch_page().await?;
        }
    }

    fn hint_demand(&mut self, demand: Demand) {
        if self.plan.is_some() {
            debug!("Ignoring demand {:?} after the first fetch", demand);
            return;
        }
        self.demand = demand;
    }
}

impl<T> fmt::Debug for PagedIterator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagedIterator")
            .field("state", &self.state)
            .field("buffered", &self.buffer.len())
            .field("demand", &self.demand)
            .field("throttle", &self.throttle)
            .finish_non_exhaustive()
    }
}
