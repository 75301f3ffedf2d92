//! Shared query-string container
//!
//! The browser URL's query string is the one process-wide piece of state
//! the paging layer owns. This container holds it as an explicit,
//! injectable value: tests construct their own instance, production code
//! shares one behind an `Arc`.
//!
//! Writes are last-write-wins and touch only the three managed keys
//! (`tab`, `page`, `filter`); unrelated query parameters are preserved.

use crate::types::QueryPairs;
use std::sync::Mutex;
use url::form_urlencoded;

/// Query key naming the active view
pub const TAB_PARAM: &str = "tab";
/// Query key carrying the active view's 1-indexed page
pub const PAGE_PARAM: &str = "page";
/// Query key carrying the active view's filter text
pub const FILTER_PARAM: &str = "filter";

/// Handle returned by [`QueryState::subscribe`]
pub type SubscriptionId = u64;

type Subscriber = Box<dyn Fn(&ViewQuery) + Send + Sync>;

/// Decoded snapshot of the managed query keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    /// Active view identifier, if any
    pub tab: Option<String>,
    /// Active view's page (1-indexed), if present and numeric
    pub page: Option<u32>,
    /// Active view's filter text, if any
    pub filter: Option<String>,
}

impl ViewQuery {
    fn from_pairs(pairs: &QueryPairs) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                TAB_PARAM => query.tab = Some(value.clone()),
                PAGE_PARAM => query.page = value.parse().ok(),
                FILTER_PARAM => query.filter = Some(value.clone()),
                _ => {}
            }
        }
        query
    }
}

struct Inner {
    pairs: QueryPairs,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: SubscriptionId,
}

/// Observable container for the shared URL query string
pub struct QueryState {
    inner: Mutex<Inner>,
}

impl QueryState {
    /// Create an empty query string
    pub fn new() -> Self {
        Self::from_query("")
    }

    /// Parse an existing query string (a leading `?` is tolerated)
    pub fn from_query(raw: &str) -> Self {
        let raw = raw.trim_start_matches('?');
        let pairs = form_urlencoded::parse(raw.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self {
            inner: Mutex::new(Inner {
                pairs,
                subscribers: Vec::new(),
                next_id: 0,
            }),
        }
    }

    /// Decode the managed keys into a snapshot
    pub fn snapshot(&self) -> ViewQuery {
        let inner = self.inner.lock().expect("query state lock poisoned");
        ViewQuery::from_pairs(&inner.pairs)
    }

    /// Serialize the full query string (managed and unmanaged keys)
    pub fn query_string(&self) -> String {
        let inner = self.inner.lock().expect("query state lock poisoned");
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(inner.pairs.iter())
            .finish()
    }

    /// Rewrite the managed keys for the active view.
    ///
    /// `tab` and `page` keep their position when already present, and are
    /// appended otherwise; a `None` filter removes the `filter` key.
    /// Unrelated keys pass through untouched. Subscribers are notified
    /// with the resulting snapshot.
    pub fn write_view(&self, tab: &str, page: u32, filter: Option<&str>) {
        let mut inner = self.inner.lock().expect("query state lock poisoned");

        let mut tab_seen = false;
        let mut page_seen = false;
        let mut filter_seen = false;
        let mut pairs = QueryPairs::new();
        for (key, value) in inner.pairs.drain(..) {
            match key.as_str() {
                TAB_PARAM if !tab_seen => {
                    tab_seen = true;
                    pairs.push((key, tab.to_string()));
                }
                PAGE_PARAM if !page_seen => {
                    page_seen = true;
                    pairs.push((key, page.to_string()));
                }
                FILTER_PARAM if !filter_seen => {
                    filter_seen = true;
                    if let Some(filter) = filter {
                        pairs.push((key, filter.to_string()));
                    }
                }
                // Duplicate managed keys collapse into the first occurrence.
                TAB_PARAM | PAGE_PARAM | FILTER_PARAM => {}
                _ => pairs.push((key, value)),
            }
        }
        if !tab_seen {
            pairs.push((TAB_PARAM.to_string(), tab.to_string()));
        }
        if !page_seen {
            pairs.push((PAGE_PARAM.to_string(), page.to_string()));
        }
        if !filter_seen {
            if let Some(filter) = filter {
                pairs.push((FILTER_PARAM.to_string(), filter.to_string()));
            }
        }
        inner.pairs = pairs;

        let snapshot = ViewQuery::from_pairs(&inner.pairs);
        for (_, subscriber) in &inner.subscribers {
            subscriber(&snapshot);
        }
    }

    /// Register a callback invoked after every write.
    ///
    /// The callback runs with the container lock held and must not call
    /// back into this `QueryState`.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ViewQuery) + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock().expect("query state lock poisoned");
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscription; returns false if the id was unknown
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.lock().expect("query state lock poisoned");
        let before = inner.subscribers.len();
        inner.subscribers.retain(|(sub_id, _)| *sub_id != id);
        inner.subscribers.len() < before
    }
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for QueryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryState")
            .field("query", &self.query_string())
            .finish_non_exhaustive()
    }
}
