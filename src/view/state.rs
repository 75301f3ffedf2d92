//! Per-view page state machine

use crate::links::{PageLinks, PageRel};
use crate::view::query::ViewQuery;
use tracing::debug;

/// One list view's paging state.
///
/// Lives for the mounted lifetime of its view. The page is always >= 1;
/// navigation below 1 clamps to 1 and navigation above the last known page
/// clamps to that page. Responses are applied through a generation counter
/// so that a fetch superseded by quicker navigation cannot overwrite newer
/// state.
#[derive(Debug, Clone)]
pub struct ViewPageState {
    view_id: String,
    page: u32,
    filter: Option<String>,
    last_known_page: Option<u32>,
    links: PageLinks,
    generation: u64,
}

impl ViewPageState {
    /// Derive the initial state from the shared query snapshot.
    ///
    /// The URL's page applies only when its `tab` names this view;
    /// otherwise the page defaults to 1. A filter present in the URL is
    /// adopted either way.
    pub fn mount(view_id: impl Into<String>, query: &ViewQuery) -> Self {
        let view_id = view_id.into();
        let page = if query.tab.as_deref() == Some(view_id.as_str()) {
            query.page.unwrap_or(1).max(1)
        } else {
            1
        };
        Self {
            view_id,
            page,
            filter: query.filter.clone(),
            last_known_page: None,
            links: PageLinks::default(),
            generation: 0,
        }
    }

    /// The view's identifier
    pub fn view_id(&self) -> &str {
        &self.view_id
    }

    /// Current 1-indexed page
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Current filter text, if any
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Neighbor links from the most recently applied response
    pub fn links(&self) -> &PageLinks {
        &self.links
    }

    /// Highest page number observed so far, if any response arrived
    pub fn last_known_page(&self) -> Option<u32> {
        self.last_known_page
    }

    /// A later page exists (drives the "next" control)
    pub fn has_next(&self) -> bool {
        self.links.has_next()
    }

    /// An earlier page exists (drives the "prev" control)
    pub fn has_prev(&self) -> bool {
        self.links.has_prev()
    }

    /// Current fetch generation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a fetch for the current page, superseding in-flight ones.
    ///
    /// Returns the generation to pass back to [`apply_links`](Self::apply_links).
    pub fn begin_fetch(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Apply a response's links if its generation is still current.
    ///
    /// A stale generation leaves the view untouched and returns false;
    /// the transport request itself is not cancelled, only its result
    /// discarded.
    pub fn apply_links(&mut self, generation: u64, links: &PageLinks) -> bool {
        if generation != self.generation {
            debug!(
                "View {}: discarding stale response (generation {generation}, current {})",
                self.view_id, self.generation
            );
            return false;
        }
        self.links = links.clone();
        self.last_known_page = match links.get(PageRel::Last) {
            Some(last) => Some(last),
            // No next link means the current page is the last one.
            None if !links.has_next() => Some(self.page),
            None => self.last_known_page,
        };
        true
    }

    /// Move to `requested`, clamped to `[1, last known page]`.
    ///
    /// Returns the effective page. Callers treat a result equal to the
    /// previous page as a no-op (no fetch, no URL write).
    pub fn request_page(&mut self, requested: u32) -> u32 {
        let mut page = requested.max(1);
        if let Some(last) = self.last_known_page {
            page = page.min(last);
        }
        self.page = page;
        page
    }

    /// Move one page forward (clamped)
    pub fn next_page(&mut self) -> u32 {
        self.request_page(self.page + 1)
    }

    /// Move one page back (clamped)
    pub fn prev_page(&mut self) -> u32 {
        self.request_page(self.page.saturating_sub(1))
    }

    /// Replace the filter and reset to page 1.
    ///
    /// The previous result set's links no longer describe the filtered
    /// collection, so they are cleared along with the page bound.
    pub fn set_filter(&mut self, filter: Option<String>) {
        self.filter = filter;
        self.page = 1;
        self.last_known_page = None;
        self.links = PageLinks::default();
    }
}
