use super::*;
use crate::error::Error;
use crate::pagination::{Link, PageFetcher, PageLinks, PageRequest, RawPage};
use futures::StreamExt;
use pretty_assertions::assert_eq;
use std::num::NonZeroU32;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use test_case::test_case;
use tokio::time::Instant;

/// In-memory collection of `0..len`, cursored by item value
struct FakeCollection {
    len: u32,
    fail_on_call: Option<usize>,
    link_base: &'static str,
    requests: Mutex<Vec<(PageRequest, Instant)>>,
}

impl FakeCollection {
    fn new(len: u32) -> Arc<Self> {
        Arc::new(Self {
            len,
            fail_on_call: None,
            link_base: "https://api.test",
            requests: Mutex::new(Vec::new()),
        })
    }

    fn failing_on(len: u32, call: usize) -> Arc<Self> {
        Arc::new(Self {
            len,
            fail_on_call: Some(call),
            link_base: "https://api.test",
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Same collection, but `next` links are relative to the API root
    fn with_relative_links(len: u32) -> Arc<Self> {
        Arc::new(Self {
            len,
            fail_on_call: None,
            link_base: "",
            requests: Mutex::new(Vec::new()),
        })
    }

    fn limits(&self) -> Vec<u32> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(r, _)| r.limit.unwrap_or_default())
            .collect()
    }

    fn cursors(&self) -> Vec<Option<String>> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(r, _)| r.from.clone())
            .collect()
    }

    fn instants(&self) -> Vec<Instant> {
        self.requests.lock().unwrap().iter().map(|(_, t)| *t).collect()
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl PageFetcher<u32> for FakeCollection {
    async fn fetch(&self, request: PageRequest) -> Result<RawPage<u32>> {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push((request.clone(), Instant::now()));
            requests.len()
        };
        if self.fail_on_call == Some(call) {
            return Err(Error::api(503, "Service Unavailable", "try again later"));
        }

        let start: u32 = request.from.as_deref().map_or(0, |c| c.parse().unwrap());
        let limit = request.limit.unwrap_or(DEFAULT_LIMIT);
        let end = (start + limit).min(self.len);
        let next = (end < self.len).then(|| {
            Link::new(format!(
                "{}/v2/items?from={end}&limit={limit}",
                self.link_base
            ))
        });

        Ok(RawPage {
            items: (start..end).collect(),
            count: Some(end - start),
            links: PageLinks {
                next,
                ..PageLinks::default()
            },
        })
    }
}

const DEFAULT_LIMIT: u32 = 50;

fn source(collection: &Arc<FakeCollection>) -> PagedIterator<u32> {
    PagedIterator::new(Arc::clone(collection) as Arc<dyn PageFetcher<u32>>)
}

// Demand estimation

#[tokio::test]
async fn test_skip_then_take_demands_sum() {
    let collection = FakeCollection::new(1000);
    let items = source(&collection).skip(10).take(80).collect().await.unwrap();

    assert_eq!(items, (10..90).collect::<Vec<_>>());
    assert_eq!(collection.limits(), vec![90]);
}

#[tokio::test]
async fn test_take_then_skip_demands_take() {
    let collection = FakeCollection::new(1000);
    let items = source(&collection).take(80).skip(10).collect().await.unwrap();

    assert_eq!(items, (10..80).collect::<Vec<_>>());
    assert_eq!(collection.limits(), vec![80]);
}

#[tokio::test]
async fn test_filter_drops_bound() {
    let collection = FakeCollection::new(1000);
    let items = source(&collection)
        .filter(|n| n % 2 == 0)
        .take(80)
        .collect()
        .await
        .unwrap();

    assert_eq!(items.len(), 80);
    assert_eq!(items.last(), Some(&158));
    assert_eq!(collection.limits(), vec![128, 250]);
}

#[test_case(100, 80 ; "outer take is tighter")]
#[test_case(80, 100 ; "inner take is tighter")]
#[tokio::test]
async fn test_nested_takes_collapse(inner: usize, outer: usize) {
    let collection = FakeCollection::new(1000);
    let items = source(&collection)
        .take(inner)
        .take(outer)
        .collect()
        .await
        .unwrap();

    assert_eq!(items.len(), 80);
    assert_eq!(collection.limits(), vec![80]);
}

#[tokio::test]
async fn test_map_passes_demand_through() {
    let collection = FakeCollection::new(1000);
    let items = source(&collection)
        .map(|n| n.to_string())
        .take(5)
        .collect()
        .await
        .unwrap();

    assert_eq!(items, vec!["0", "1", "2", "3", "4"]);
    assert_eq!(collection.limits(), vec![5]);
}

#[tokio::test]
async fn test_large_take_is_split_into_max_pages() {
    let collection = FakeCollection::new(5000);
    let items = source(&collection).take(3218).collect().await.unwrap();

    assert_eq!(items.len(), 3218);
    let mut expected = vec![250; 12];
    expected.push(218);
    assert_eq!(collection.limits(), expected);
}

#[tokio::test]
async fn test_unbounded_starts_at_default_then_max() {
    let collection = FakeCollection::new(600);
    let items = source(&collection).collect().await.unwrap();

    assert_eq!(items.len(), 600);
    assert_eq!(collection.limits(), vec![128, 250, 250]);
}

#[tokio::test]
async fn test_take_zero_never_fetches() {
    let collection = FakeCollection::new(10);
    let mut iter = source(&collection).take(0);

    assert!(iter.next().await.unwrap().is_none());
    assert_eq!(collection.calls(), 0);
}

#[tokio::test]
async fn test_spent_bound_keeps_fetching_at_default() {
    let collection = FakeCollection::new(1000);
    let mut iter = source(&collection);
    iter.hint_demand(Demand::Bounded(3));

    let mut items = Vec::new();
    for _ in 0..5 {
        items.push(iter.next().await.unwrap().unwrap());
    }

    assert_eq!(items, vec![0, 1, 2, 3, 4]);
    assert_eq!(collection.limits(), vec![3, 128]);
}

#[tokio::test]
async fn test_demand_frozen_after_first_fetch() {
    let collection = FakeCollection::new(1000);
    let mut iter = source(&collection);
    iter.hint_demand(Demand::Bounded(10));
    iter.next().await.unwrap();

    iter.hint_demand(Demand::Bounded(500));
    assert_eq!(iter.demand(), Demand::Bounded(10));
}

// Sequencing

#[tokio::test]
async fn test_composition_does_not_fetch() {
    let collection = FakeCollection::new(10);
    let _chain = source(&collection)
        .skip(2)
        .filter(|n| *n > 3)
        .map(|n| n * 2)
        .take(3);

    assert_eq!(collection.calls(), 0);
}

#[tokio::test]
async fn test_exhaustion_stops_requests() {
    let collection = FakeCollection::new(300);
    let mut iter = source(&collection);

    let mut seen = 0;
    while iter.next().await.unwrap().is_some() {
        seen += 1;
    }
    assert_eq!(seen, 300);
    assert_eq!(collection.calls(), 2);

    assert!(iter.next().await.unwrap().is_none());
    assert!(iter.next().await.unwrap().is_none());
    assert_eq!(collection.calls(), 2);
    assert!(iter.is_exhausted());
}

#[tokio::test]
async fn test_pages_follow_server_cursor() {
    let collection = FakeCollection::new(300);
    source(&collection).collect().await.unwrap();

    assert_eq!(
        collection.cursors(),
        vec![None, Some("128".to_string())]
    );
}

#[tokio::test]
async fn test_starting_from_cursor() {
    let collection = FakeCollection::new(20);
    let items = source(&collection)
        .starting_from("15")
        .collect()
        .await
        .unwrap();

    assert_eq!(items, vec![15, 16, 17, 18, 19]);
}

#[tokio::test]
async fn test_empty_collection() {
    let collection = FakeCollection::new(0);
    let items = source(&collection).collect().await.unwrap();

    assert!(items.is_empty());
    assert_eq!(collection.calls(), 1);
}

#[tokio::test]
async fn test_error_is_returned_once_then_done() {
    let collection = FakeCollection::failing_on(1000, 2);
    let mut iter = source(&collection).take(300);

    for expected in 0..250 {
        assert_eq!(iter.next().await.unwrap(), Some(expected));
    }

    let err = iter.next().await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert!(iter.next().await.unwrap().is_none());
    assert_eq!(collection.calls(), 2);
}

#[tokio::test]
async fn test_relative_next_links_are_followed() {
    let collection = FakeCollection::with_relative_links(300);
    let items = source(&collection).collect().await.unwrap();

    assert_eq!(items, (0..300).collect::<Vec<_>>());
    assert_eq!(
        collection.cursors(),
        vec![None, Some("128".to_string())]
    );
}

/// Serves one page whose `next` link has lost its cursor
struct CursorlessNext;

#[async_trait]
impl PageFetcher<u32> for CursorlessNext {
    async fn fetch(&self, _request: PageRequest) -> Result<RawPage<u32>> {
        Ok(RawPage {
            items: (0..10).collect(),
            count: Some(10),
            links: PageLinks {
                next: Some(Link::new("https://api.test/v2/items?limit=10")),
                ..PageLinks::default()
            },
        })
    }
}

#[tokio::test]
async fn test_next_link_without_cursor_is_an_error() {
    let mut iter = PagedIterator::new(Arc::new(CursorlessNext) as Arc<dyn PageFetcher<u32>>);

    let err = iter.next().await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
    assert!(iter.next().await.unwrap().is_none());
    assert!(iter.is_exhausted());
}

// Terminal consumers

#[tokio::test]
async fn test_for_each() {
    let collection = FakeCollection::new(10);
    let mut sum = 0;
    source(&collection).for_each(|n| sum += n).await.unwrap();
    assert_eq!(sum, 45);
}

#[tokio::test]
async fn test_all_and_any_short_circuit() {
    let collection = FakeCollection::new(1000);

    let mut iter = source(&collection);
    assert!(!iter.all(|n| n < 5).await.unwrap());
    assert_eq!(collection.calls(), 1);

    let mut iter = source(&collection);
    assert!(iter.any(|n| n == 3).await.unwrap());
    assert_eq!(iter.next().await.unwrap(), Some(4));
}

#[tokio::test]
async fn test_all_on_empty_is_true() {
    let collection = FakeCollection::new(0);
    assert!(source(&collection).all(|_| false).await.unwrap());
}

#[tokio::test]
async fn test_find() {
    let collection = FakeCollection::new(500);
    let mut iter = source(&collection);

    assert_eq!(iter.find(|n| *n == 200).await.unwrap(), Some(200));
    assert_eq!(iter.find(|n| *n == 10).await.unwrap(), None);
}

#[tokio::test]
async fn test_async_stages() {
    let collection = FakeCollection::new(20);
    let items = source(&collection)
        .filter_async(|n| {
            let n = *n;
            async move { n % 5 == 0 }
        })
        .then(|n| async move {
            tokio::task::yield_now().await;
            n + 1
        })
        .collect()
        .await
        .unwrap();

    assert_eq!(items, vec![1, 6, 11, 16]);
}

#[tokio::test]
async fn test_into_stream() {
    let collection = FakeCollection::new(7);
    let items: Vec<u32> = source(&collection)
        .into_stream()
        .map(|r| r.unwrap())
        .collect()
        .await;

    assert_eq!(items, (0..7).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_into_stream_ends_after_error() {
    let collection = FakeCollection::failing_on(1000, 1);
    let results: Vec<_> = source(&collection).into_stream().collect().await;

    assert_eq!(results.len(), 1);
    assert!(results[0].is_err());
}

// Throttling

#[tokio::test(start_paused = true)]
async fn test_throttle_spaces_page_fetches() {
    let collection = FakeCollection::new(300);
    let budget = NonZeroU32::new(600).unwrap();
    let items = source(&collection)
        .with_throttle(budget)
        .take(300)
        .collect()
        .await
        .unwrap();
    assert_eq!(items.len(), 300);

    // 250 items at 600/min must be spread over 25 seconds
    let instants = collection.instants();
    assert_eq!(instants.len(), 2);
    assert!(instants[1] - instants[0] >= Duration::from_secs(25));
}

#[tokio::test(start_paused = true)]
async fn test_throttle_does_not_delay_first_fetch() {
    let collection = FakeCollection::new(10);
    let start = Instant::now();
    let mut iter = source(&collection).with_throttle(NonZeroU32::new(1).unwrap());

    iter.next().await.unwrap();
    assert_eq!(collection.instants()[0], start);
}

#[tokio::test(start_paused = true)]
async fn test_throttled_fetch_is_pending_until_deadline() {
    let collection = FakeCollection::new(20);
    let mut iter = source(&collection)
        .with_throttle(NonZeroU32::new(60).unwrap());
    iter.hint_demand(Demand::Bounded(10));
    for _ in 0..10 {
        iter.next().await.unwrap();
    }

    // 10 items at 60/min: the next page may not go out for 10 seconds
    let mut next = tokio_test::task::spawn(iter.next());
    tokio_test::assert_pending!(next.poll());

    tokio::time::advance(Duration::from_secs(9)).await;
    tokio_test::assert_pending!(next.poll());
    assert_eq!(collection.calls(), 1);

    tokio::time::advance(Duration::from_secs(1)).await;
    let item = tokio_test::assert_ready!(next.poll()).unwrap();
    assert_eq!(item, Some(10));
    assert_eq!(collection.calls(), 2);
}
