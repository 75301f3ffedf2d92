//! Named registry of mounted views
//!
//! Views are addressed strictly by `view_id`; nothing is inferred from
//! mount order or screen position. The registry tracks which single view
//! is active and writes only that view's transitions into the shared
//! query string.

use crate::error::{Error, Result};
use crate::links::PageLinks;
use crate::view::query::QueryState;
use crate::view::state::ViewPageState;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry mapping `view_id -> ViewPageState` with one active view
#[derive(Debug)]
pub struct ViewRegistry {
    query: Arc<QueryState>,
    views: HashMap<String, ViewPageState>,
    active: Option<String>,
}

impl ViewRegistry {
    /// Create a registry over a shared query container
    pub fn new(query: Arc<QueryState>) -> Self {
        Self {
            query,
            views: HashMap::new(),
            active: None,
        }
    }

    /// The shared query container
    pub fn query(&self) -> &Arc<QueryState> {
        &self.query
    }

    /// Mount a view, deriving its initial state from the current URL.
    ///
    /// Remounting an id replaces the previous state, as a recreated view
    /// does.
    pub fn mount(&mut self, view_id: impl Into<String>) -> &ViewPageState {
        let view_id = view_id.into();
        let snapshot = self.query.snapshot();
        let state = ViewPageState::mount(view_id.clone(), &snapshot);
        match self.views.entry(view_id) {
            Entry::Occupied(mut entry) => {
                entry.insert(state);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(state),
        }
    }

    /// Drop a view's state
    pub fn unmount(&mut self, view_id: &str) {
        self.views.remove(view_id);
        if self.active.as_deref() == Some(view_id) {
            self.active = None;
        }
    }

    /// The state of a mounted view
    pub fn get(&self, view_id: &str) -> Option<&ViewPageState> {
        self.views.get(view_id)
    }

    /// Identifier of the active view, if one is set
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Make a view active and reflect its state in the URL.
    ///
    /// Other mounted views keep their remembered page in local state;
    /// switching never resets them.
    pub fn activate(&mut self, view_id: &str) -> Result<()> {
        let view = self.view(view_id)?;
        let (page, filter) = (view.page(), view.filter().map(str::to_owned));
        self.active = Some(view_id.to_string());
        self.query.write_view(view_id, page, filter.as_deref());
        Ok(())
    }

    /// Move a view to `requested` (clamped).
    ///
    /// Returns the page to fetch, or `None` when clamping landed on the
    /// page the view already shows (no fetch, no URL write). The URL is
    /// rewritten only when the view is active.
    pub fn request_page(&mut self, view_id: &str, requested: u32) -> Result<Option<u32>> {
        let view = self.view_mut(view_id)?;
        let before = view.page();
        let after = view.request_page(requested);
        if after == before {
            return Ok(None);
        }
        self.write_if_active(view_id);
        Ok(Some(after))
    }

    /// Move a view one page forward (clamped)
    pub fn next_page(&mut self, view_id: &str) -> Result<Option<u32>> {
        let current = self.view(view_id)?.page();
        self.request_page(view_id, current + 1)
    }

    /// Move a view one page back (clamped)
    pub fn prev_page(&mut self, view_id: &str) -> Result<Option<u32>> {
        let current = self.view(view_id)?.page();
        self.request_page(view_id, current.saturating_sub(1))
    }

    /// Replace a view's filter, resetting it to page 1.
    ///
    /// Returns the page to fetch (always 1). The URL picks up the new
    /// filter only when the view is active.
    pub fn set_filter(&mut self, view_id: &str, filter: Option<String>) -> Result<u32> {
        let view = self.view_mut(view_id)?;
        view.set_filter(filter);
        self.write_if_active(view_id);
        Ok(1)
    }

    /// Start a fetch for a view, superseding in-flight ones
    pub fn begin_fetch(&mut self, view_id: &str) -> Result<u64> {
        Ok(self.view_mut(view_id)?.begin_fetch())
    }

    /// Apply a response's links to a view; false means it was stale
    pub fn apply_links(
        &mut self,
        view_id: &str,
        generation: u64,
        links: &PageLinks,
    ) -> Result<bool> {
        Ok(self.view_mut(view_id)?.apply_links(generation, links))
    }

    fn view(&self, view_id: &str) -> Result<&ViewPageState> {
        self.views
            .get(view_id)
            .ok_or_else(|| Error::view_not_found(view_id))
    }

    fn view_mut(&mut self, view_id: &str) -> Result<&mut ViewPageState> {
        self.views
            .get_mut(view_id)
            .ok_or_else(|| Error::view_not_found(view_id))
    }

    fn write_if_active(&self, view_id: &str) {
        if self.active.as_deref() != Some(view_id) {
            return;
        }
        if let Some(view) = self.views.get(view_id) {
            self.query.write_view(view_id, view.page(), view.filter());
        }
    }
}
