//! Values-per-minute throttling between page fetches

use std::num::NonZeroU32;
use std::time::Duration;
use tokio::time::Instant;

const NANOS_PER_MINUTE: u128 = 60 * 1_000_000_000;

/// Paces page fetches so that a chain consumes at most
/// `values_per_minute` items per minute.
///
/// After a page of `P` items arrives, the next fetch waits until
/// `60 * P / values_per_minute` seconds have passed since that arrival.
#[derive(Debug, Clone)]
pub struct Throttle {
    values_per_minute: NonZeroU32,
    not_before: Option<Instant>,
}

impl Throttle {
    pub fn new(values_per_minute: NonZeroU32) -> Self {
        Self {
            values_per_minute,
            not_before: None,
        }
    }

    pub fn values_per_minute(&self) -> u32 {
        self.values_per_minute.get()
    }

    /// Minimum spacing after a page of `values` items, rounded up to the nanosecond
    pub fn delay_for(&self, values: usize) -> Duration {
        let budget = u128::from(self.values_per_minute.get());
        let nanos = (NANOS_PER_MINUTE * values as u128).div_ceil(budget);
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }

    /// Start the wait for a page of `values` items that just arrived
    pub fn record(&mut self, values: usize) {
        self.not_before = Some(Instant::now() + self.delay_for(values));
    }

    /// When the next fetch may go out, if it has to wait at all
    pub fn not_before(&self) -> Option<Instant> {
        self.not_before
    }

    /// Sleep until the next fetch is allowed
    pub async fn wait(&self) {
        if let Some(deadline) = self.not_before {
            tokio::time::sleep_until(deadline).await;
        }
    }
}
