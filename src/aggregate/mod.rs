//! Multi-page aggregation
//!
//! Drives the single-page fetch client across every page of a collection
//! and merges the results into one logical sequence, optionally excluding
//! items already known elsewhere and optionally stopping at a result cap.
//!
//! # Overview
//!
//! The walk starts at page 1 and terminates against the most recently
//! observed `last` bound rather than the one captured at the start, so a
//! collection that grows while the walk is in progress still terminates
//! against the latest known upper bound. Any failed page aborts the whole
//! aggregation: partial results are discarded and the caller receives only
//! the failure status.

use crate::error::Result;
use crate::http::PagedFetchClient;
use crate::links::{PageLinks, PageRel};
use crate::types::{CollectionItem, QueryPairs, ResultPage};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use tracing::{debug, warn};


// ============================================================================
// Aggregation Request
// ============================================================================

/// Parameters of one aggregation run
#[derive(Debug, Clone, Default)]
pub struct AggregationRequest {
    /// Query parameters sent with every page request, in order
    pub base_query: QueryPairs,
    /// Hard cap on the merged result size (None = unbounded)
    pub cap: Option<usize>,
    /// Identifiers of items the caller already has
    pub exclude_ids: HashSet<String>,
}

impl AggregationRequest {
    /// Create an empty request
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.base_query.push((key.into(), value.into()));
        self
    }

    /// Cap the merged result at `cap` items
    #[must_use]
    pub fn cap(mut self, cap: usize) -> Self {
        self.cap = Some(cap);
        self
    }

    /// Exclude a single item id from the result
    #[must_use]
    pub fn exclude(mut self, id: impl Into<String>) -> Self {
        self.exclude_ids.insert(id.into());
        self
    }

    /// Exclude a batch of item ids from the result
    #[must_use]
    pub fn exclude_all<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_ids.extend(ids.into_iter().map(Into::into));
        self
    }
}

// ============================================================================
// Aggregator
// ============================================================================

/// Walks all pages of one collection through a borrowed fetch client.
///
/// The returned page's `links` field is always empty; only `items` and
/// `status` are meaningful for an aggregated result.
#[derive(Debug)]
pub struct Aggregator<'a> {
    client: &'a PagedFetchClient,
}

impl<'a> Aggregator<'a> {
    /// Create an aggregator over the given fetch client
    pub fn new(client: &'a PagedFetchClient) -> Self {
        Self { client }
    }

    /// Merge every page of `endpoint` into one sequence.
    ///
    /// Pages are concatenated in ascending page order with the server's
    /// item order preserved. Excluded ids are filtered before items are
    /// appended; the accumulator is truncated to `cap` after every page
    /// and the walk stops as soon as the cap is met. Items spanning two
    /// overlapping pages during concurrent growth are not de-duplicated.
    pub async fn aggregate<T>(
        &self,
        endpoint: &str,
        request: &AggregationRequest,
    ) -> Result<ResultPage<T>>
    where
        T: DeserializeOwned + CollectionItem,
    {
        let mut items: Vec<T> = Vec::new();
        let mut page: u32 = 1;
        let mut pages_fetched: u32 = 0;
        let mut last_seen: Option<u32> = None;

        loop {
            let result: ResultPage<T> = self
                .client
                .fetch_page(endpoint, page, &request.base_query)
                .await?;

            if result.status.is_err() {
                // Fatal to the whole run: drop whatever accumulated.
                warn!(
                    "Aggregation of {endpoint} aborted on page {page}: {}",
                    result.status
                );
                return Ok(ResultPage {
                    items: Vec::new(),
                    links: PageLinks::default(),
                    status: result.status,
                });
            }

            pages_fetched += 1;
            let before = items.len();
            for item in result.items {
                if let Some(id) = item.item_id() {
                    if request.exclude_ids.contains(&id) {
                        continue;
                    }
                }
                items.push(item);
            }
            debug!(
                "Page {page} of {endpoint}: kept {} items",
                items.len() - before
            );

            if let Some(cap) = request.cap {
                if items.len() >= cap {
                    items.truncate(cap);
                    break;
                }
            }

            // Re-read the bound from every response that carries one, so
            // concurrent growth moves the goalpost instead of being missed.
            // A response that drops its `last` entry (per-entry skip) must
            // not end the walk early: the remembered bound still applies,
            // and a `next` link means more pages exist regardless.
            if let Some(last) = result.links.get(PageRel::Last) {
                last_seen = Some(last);
            }
            let more_pages = match last_seen {
                Some(last) if page < last => true,
                _ => result.links.has_next(),
            };
            if !more_pages {
                break;
            }
            page += 1;
        }

        debug!(
            "Aggregated {} items across {pages_fetched} pages from {endpoint}",
            items.len()
        );
        Ok(ResultPage::ok(items, PageLinks::default()))
    }
}
