use super::*;
use crate::links::{parse_links, PageLinks, PageRel};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn links_for(header: &str, current_page: u32) -> PageLinks {
    parse_links(Some(header), current_page)
}

fn registry_with(query: &str) -> ViewRegistry {
    ViewRegistry::new(Arc::new(QueryState::from_query(query)))
}

// ============================================================================
// QueryState
// ============================================================================

#[test]
fn test_query_state_round_trip_preserves_unrelated_keys() {
    let state = QueryState::from_query("?semester=2026s&tab=rooms&page=3&sort=name");

    let snapshot = state.snapshot();
    assert_eq!(snapshot.tab.as_deref(), Some("rooms"));
    assert_eq!(snapshot.page, Some(3));
    assert_eq!(snapshot.filter, None);

    assert_eq!(state.query_string(), "semester=2026s&tab=rooms&page=3&sort=name");
}

#[test]
fn test_query_state_write_replaces_managed_keys_in_place() {
    let state = QueryState::from_query("semester=2026s&tab=rooms&page=3&sort=name");
    state.write_view("teachers", 1, Some("phys"));

    assert_eq!(
        state.query_string(),
        "semester=2026s&tab=teachers&page=1&sort=name&filter=phys"
    );
}

#[test]
fn test_query_state_write_appends_missing_managed_keys() {
    let state = QueryState::from_query("semester=2026s");
    state.write_view("rooms", 2, None);

    assert_eq!(state.query_string(), "semester=2026s&tab=rooms&page=2");
}

#[test]
fn test_query_state_none_filter_removes_filter_key() {
    let state = QueryState::from_query("tab=rooms&page=2&filter=lab");
    state.write_view("rooms", 2, None);

    assert_eq!(state.query_string(), "tab=rooms&page=2");
}

#[test]
fn test_query_state_collapses_duplicate_managed_keys() {
    let state = QueryState::from_query("page=2&x=1&page=9");
    state.write_view("rooms", 4, None);

    assert_eq!(state.query_string(), "page=4&x=1&tab=rooms");
}

#[test]
fn test_query_state_non_numeric_page_ignored() {
    let state = QueryState::from_query("tab=rooms&page=abc");
    assert_eq!(state.snapshot().page, None);
}

#[test]
fn test_query_state_subscribers_notified_with_snapshot() {
    let state = QueryState::new();
    let calls = Arc::new(AtomicUsize::new(0));

    let seen = Arc::clone(&calls);
    let id = state.subscribe(move |query| {
        assert_eq!(query.tab.as_deref(), Some("rooms"));
        assert_eq!(query.page, Some(2));
        seen.fetch_add(1, Ordering::SeqCst);
    });

    state.write_view("rooms", 2, None);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    assert!(state.unsubscribe(id));
    state.write_view("rooms", 2, None);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    assert!(!state.unsubscribe(id));
}

// ============================================================================
// ViewPageState
// ============================================================================

#[test]
fn test_mount_adopts_page_when_tab_matches() {
    let query = QueryState::from_query("tab=rooms&page=3&filter=lab");
    let state = ViewPageState::mount("rooms", &query.snapshot());

    assert_eq!(state.page(), 3);
    assert_eq!(state.filter(), Some("lab"));
    assert_eq!(state.last_known_page(), None);
}

#[test]
fn test_mount_defaults_to_page_one_on_tab_mismatch() {
    let query = QueryState::from_query("tab=rooms&page=3&filter=lab");
    let state = ViewPageState::mount("teachers", &query.snapshot());

    // The page belongs to the other view, the filter is adopted anyway.
    assert_eq!(state.page(), 1);
    assert_eq!(state.filter(), Some("lab"));
}

#[test]
fn test_mount_clamps_url_page_zero_to_one() {
    let query = QueryState::from_query("tab=rooms&page=0");
    let state = ViewPageState::mount("rooms", &query.snapshot());
    assert_eq!(state.page(), 1);
}

#[test]
fn test_apply_links_records_last_known_page() {
    let query = QueryState::new();
    let mut state = ViewPageState::mount("rooms", &query.snapshot());

    let generation = state.begin_fetch();
    let links = links_for(
        "<http://api/rooms?page=1>; rel=\"next\", <http://api/rooms?page=3>; rel=\"last\"",
        1,
    );
    assert!(state.apply_links(generation, &links));

    assert_eq!(state.last_known_page(), Some(3));
    assert!(state.has_next());
    assert!(!state.has_prev());
}

#[test]
fn test_apply_links_without_next_pins_last_known_to_current() {
    let query = QueryState::new();
    let mut state = ViewPageState::mount("rooms", &query.snapshot());

    let generation = state.begin_fetch();
    assert!(state.apply_links(generation, &PageLinks::default()));

    assert_eq!(state.last_known_page(), Some(1));
    assert!(!state.has_next());
}

#[test]
fn test_stale_generation_is_discarded() {
    let query = QueryState::new();
    let mut state = ViewPageState::mount("rooms", &query.snapshot());

    let stale = state.begin_fetch();
    let current = state.begin_fetch();

    let links = links_for("<http://api/rooms?page=5>; rel=\"last\"", 1);
    assert!(!state.apply_links(stale, &links));
    assert_eq!(state.last_known_page(), None);
    assert!(state.links().is_empty());

    assert!(state.apply_links(current, &links));
    assert_eq!(state.last_known_page(), Some(5));
}

#[test]
fn test_navigation_clamps_to_known_bounds() {
    let query = QueryState::new();
    let mut state = ViewPageState::mount("rooms", &query.snapshot());

    let generation = state.begin_fetch();
    state.apply_links(
        generation,
        &links_for("<http://api/rooms?page=4>; rel=\"last\"", 1),
    );

    assert_eq!(state.request_page(99), 4);
    assert_eq!(state.request_page(0), 1);
    assert_eq!(state.prev_page(), 1);
    assert_eq!(state.next_page(), 2);
}

#[test]
fn test_set_filter_resets_page_and_bounds() {
    let query = QueryState::from_query("tab=rooms&page=4");
    let mut state = ViewPageState::mount("rooms", &query.snapshot());

    let generation = state.begin_fetch();
    state.apply_links(
        generation,
        &links_for("<http://api/rooms?page=6>; rel=\"last\"", 4),
    );
    assert_eq!(state.last_known_page(), Some(6));

    state.set_filter(Some("lab".to_string()));

    assert_eq!(state.page(), 1);
    assert_eq!(state.filter(), Some("lab"));
    assert_eq!(state.last_known_page(), None);
    assert!(state.links().is_empty());
}

// ============================================================================
// ViewRegistry
// ============================================================================

#[test]
fn test_registry_mount_and_get() {
    let mut registry = registry_with("tab=rooms&page=2");

    registry.mount("rooms");
    registry.mount("teachers");

    assert_eq!(registry.get("rooms").map(ViewPageState::page), Some(2));
    assert_eq!(registry.get("teachers").map(ViewPageState::page), Some(1));
    assert!(registry.get("courses").is_none());
}

#[test]
fn test_registry_unknown_view_is_an_error() {
    let mut registry = registry_with("");

    let err = registry.next_page("ghost").unwrap_err();
    assert!(err.to_string().contains("ghost"));
}

#[test]
fn test_activate_writes_view_state_to_url() {
    let mut registry = registry_with("semester=2026s");
    registry.mount("rooms");

    registry.activate("rooms").unwrap();

    assert_eq!(registry.active(), Some("rooms"));
    assert_eq!(
        registry.query().query_string(),
        "semester=2026s&tab=rooms&page=1"
    );
}

#[test]
fn test_navigation_on_active_view_rewrites_url() {
    let mut registry = registry_with("tab=rooms&page=1");
    registry.mount("rooms");
    registry.activate("rooms").unwrap();

    let generation = registry.begin_fetch("rooms").unwrap();
    registry
        .apply_links(
            "rooms",
            generation,
            &links_for("<http://api/rooms?page=4>; rel=\"last\"", 1),
        )
        .unwrap();

    assert_eq!(registry.next_page("rooms").unwrap(), Some(2));
    assert_eq!(registry.query().query_string(), "tab=rooms&page=2");
}

#[test]
fn test_navigation_on_inactive_view_leaves_url_alone() {
    let mut registry = registry_with("tab=rooms&page=1");
    registry.mount("rooms");
    registry.mount("teachers");
    registry.activate("rooms").unwrap();

    let generation = registry.begin_fetch("teachers").unwrap();
    registry
        .apply_links(
            "teachers",
            generation,
            &links_for("<http://api/teachers?page=3>; rel=\"last\"", 1),
        )
        .unwrap();

    assert_eq!(registry.next_page("teachers").unwrap(), Some(2));
    assert_eq!(registry.query().query_string(), "tab=rooms&page=1");
}

#[test]
fn test_clamped_navigation_to_same_page_is_a_no_op() {
    let mut registry = registry_with("tab=rooms&page=4");
    registry.mount("rooms");
    registry.activate("rooms").unwrap();

    let generation = registry.begin_fetch("rooms").unwrap();
    registry
        .apply_links(
            "rooms",
            generation,
            &links_for("<http://api/rooms?page=4>; rel=\"last\"", 4),
        )
        .unwrap();

    // Already on the last known page: forward navigation clamps back to
    // it, so no fetch is requested and the URL stays untouched.
    assert_eq!(registry.next_page("rooms").unwrap(), None);
    assert_eq!(registry.get("rooms").map(ViewPageState::page), Some(4));
    assert_eq!(registry.query().query_string(), "tab=rooms&page=4");
}

#[test]
fn test_views_keep_their_page_across_tab_switches() {
    let mut registry = registry_with("");
    registry.mount("rooms");
    registry.mount("teachers");
    registry.activate("rooms").unwrap();

    registry.request_page("rooms", 3).unwrap();
    registry.activate("teachers").unwrap();
    assert_eq!(registry.query().query_string(), "tab=teachers&page=1");

    // Switching back restores the remembered page into the URL.
    registry.activate("rooms").unwrap();
    assert_eq!(registry.get("rooms").map(ViewPageState::page), Some(3));
    assert_eq!(registry.query().query_string(), "tab=rooms&page=3");
}

#[test]
fn test_set_filter_resets_active_view_and_url() {
    let mut registry = registry_with("tab=rooms&page=3");
    registry.mount("rooms");
    registry.activate("rooms").unwrap();

    assert_eq!(
        registry.set_filter("rooms", Some("lab".to_string())).unwrap(),
        1
    );
    assert_eq!(registry.query().query_string(), "tab=rooms&page=1&filter=lab");

    assert_eq!(registry.set_filter("rooms", None).unwrap(), 1);
    assert_eq!(registry.query().query_string(), "tab=rooms&page=1");
}

#[test]
fn test_unmount_clears_active_view() {
    let mut registry = registry_with("");
    registry.mount("rooms");
    registry.activate("rooms").unwrap();

    registry.unmount("rooms");

    assert!(registry.get("rooms").is_none());
    assert_eq!(registry.active(), None);
}

#[test]
fn test_remount_rereads_the_url() {
    let mut registry = registry_with("tab=rooms&page=2");
    registry.mount("rooms");
    registry.request_page("rooms", 1).unwrap();
    assert_eq!(registry.get("rooms").map(ViewPageState::page), Some(1));

    // A remount behaves like a fresh view and derives state from the URL
    // again.
    registry.mount("rooms");
    assert_eq!(registry.get("rooms").map(ViewPageState::page), Some(2));
}

#[test]
fn test_links_drive_navigation_controls() {
    let mut registry = registry_with("");
    registry.mount("rooms");

    let generation = registry.begin_fetch("rooms").unwrap();
    let links = links_for(
        "<http://api/rooms?page=1>; rel=\"first\", <http://api/rooms?page=1>; rel=\"prev\", \
         <http://api/rooms?page=3>; rel=\"next\", <http://api/rooms?page=4>; rel=\"last\"",
        2,
    );
    registry.apply_links("rooms", generation, &links).unwrap();

    let view = registry.get("rooms").unwrap();
    assert!(view.has_prev());
    assert!(view.has_next());
    assert_eq!(view.links().get(PageRel::Last), Some(4));
}
