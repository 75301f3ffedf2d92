//! Per-view page state and shared URL synchronization
//!
//! Several independently-paged list views (tabs on one screen) share a
//! single human-navigable URL query string. Each view tracks its own
//! current page and optional filter; only the *active* view's state is
//! reflected in the URL at any time.
//!
//! # Overview
//!
//! - [`QueryState`] - injectable container for the shared query string,
//!   with subscribe/unsubscribe so tests can instantiate isolated copies
//! - [`ViewPageState`] - one view's page machine: clamped navigation,
//!   filter resets, and a generation counter that discards stale responses
//! - [`ViewRegistry`] - named `view_id -> ViewPageState` map tracking the
//!   single active view

mod query;
mod registry;
mod state;

pub use query::{QueryState, SubscriptionId, ViewQuery, FILTER_PARAM, PAGE_PARAM, TAB_PARAM};
pub use registry::ViewRegistry;
pub use state::ViewPageState;

#[cfg(test)]
mod tests;
