//! Demand estimation and page sizing

use crate::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// How many raw items the consumer of a chain is expected to pull.
///
/// Purely an optimisation: it sizes page requests and never changes which
/// items are yielded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Demand {
    /// Nothing is known; the consumer may pull forever
    #[default]
    Unbounded,
    /// The consumer pulls at most this many items
    Bounded(usize),
}

impl Demand {
    /// The tighter of two demands
    #[must_use]
    pub fn capped(self, other: Demand) -> Demand {
        match (self, other) {
            (Demand::Bounded(a), Demand::Bounded(b)) => Demand::Bounded(a.min(b)),
            (Demand::Bounded(n), Demand::Unbounded) | (Demand::Unbounded, Demand::Bounded(n)) => {
                Demand::Bounded(n)
            }
            (Demand::Unbounded, Demand::Unbounded) => Demand::Unbounded,
        }
    }

    /// Demand after `n` more items are consumed before the bound applies
    #[must_use]
    pub fn plus(self, n: usize) -> Demand {
        match self {
            Demand::Bounded(bound) => Demand::Bounded(bound.saturating_add(n)),
            Demand::Unbounded => Demand::Unbounded,
        }
    }

    pub fn bound(self) -> Option<usize> {
        match self {
            Demand::Bounded(n) => Some(n),
            Demand::Unbounded => None,
        }
    }
}

/// Sizes successive page requests from a demand frozen at the first fetch.
///
/// Bounded demand asks for exactly what is still missing, at most
/// [`MAX_PAGE_SIZE`] at a time. Unbounded demand starts at
/// [`DEFAULT_PAGE_SIZE`] and moves to the maximum once a second page is
/// needed.
#[derive(Debug, Clone)]
pub struct PagePlan {
    remaining: Option<usize>,
    pages: u32,
}

impl PagePlan {
    pub fn new(demand: Demand) -> Self {
        Self {
            remaining: demand.bound(),
            pages: 0,
        }
    }

    /// `limit` for the next page request
    pub fn next_limit(&self) -> u32 {
        match self.remaining {
            Some(remaining) if remaining > 0 => remaining.min(MAX_PAGE_SIZE as usize) as u32,
            // Bound used up while the consumer still pulls
            Some(_) => DEFAULT_PAGE_SIZE,
            None if self.pages == 0 => DEFAULT_PAGE_SIZE,
            None => MAX_PAGE_SIZE,
        }
    }

    /// Account for a received page
    pub fn record(&mut self, received: usize) {
        self.pages += 1;
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining = remaining.saturating_sub(received);
        }
    }

    /// Raw items still expected, if the demand was bounded
    pub fn remaining(&self) -> Option<usize> {
        self.remaining
    }
}
