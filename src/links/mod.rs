//! Page-relation ("Link") header parsing
//!
//! The collection API describes a page's neighbors in a comma-separated
//! header of `<url>; rel="relation"` entries, where each url carries a
//! `page=<n>` query component. A relation that is present means a page
//! exists in that direction; absence means a boundary.
//!
//! The header format and the digit extraction after `page=` are a bit-exact
//! contract with the server and must not change silently.

use once_cell::sync::Lazy;
use regex::Regex;


/// First run of digits following `page=` in a link target url.
static PAGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"page=(\d+)").expect("valid page regex"));

// ============================================================================
// Relations
// ============================================================================

/// A named direction from the current page to another page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageRel {
    /// The first page of the collection
    First,
    /// The page before the current one
    Prev,
    /// The page after the current one
    Next,
    /// The last page of the collection
    Last,
}

impl PageRel {
    /// Parse a rel attribute value; unrecognized relations yield `None`
    pub fn from_rel(rel: &str) -> Option<Self> {
        match rel {
            "first" => Some(Self::First),
            "prev" => Some(Self::Prev),
            "next" => Some(Self::Next),
            "last" => Some(Self::Last),
            _ => None,
        }
    }

    /// The wire name of this relation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Prev => "prev",
            Self::Next => "next",
            Self::Last => "last",
        }
    }
}

// ============================================================================
// Page Links
// ============================================================================

/// Mapping from relation to target page number.
///
/// Built fresh per response; replaced, never mutated in place, once handed
/// to a view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLinks {
    first: Option<u32>,
    prev: Option<u32>,
    next: Option<u32>,
    last: Option<u32>,
}

impl PageLinks {
    /// Create an empty mapping (no known neighbors)
    pub fn new() -> Self {
        Self::default()
    }

    /// Target page for a relation, if the link is present
    pub fn get(&self, rel: PageRel) -> Option<u32> {
        match rel {
            PageRel::First => self.first,
            PageRel::Prev => self.prev,
            PageRel::Next => self.next,
            PageRel::Last => self.last,
        }
    }

    /// True when no relation is present
    pub fn is_empty(&self) -> bool {
        self.first.is_none() && self.prev.is_none() && self.next.is_none() && self.last.is_none()
    }

    /// A `next` link exists, so the current page is not the last one
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// A `prev` link exists, so the current page is not the first one
    pub fn has_prev(&self) -> bool {
        self.prev.is_some()
    }

    fn set(&mut self, rel: PageRel, page: u32) {
        match rel {
            PageRel::First => self.first = Some(page),
            PageRel::Prev => self.prev = Some(page),
            PageRel::Next => self.next = Some(page),
            PageRel::Last => self.last = Some(page),
        }
    }

    fn remove(&mut self, rel: PageRel) {
        match rel {
            PageRel::First => self.first = None,
            PageRel::Prev => self.prev = None,
            PageRel::Next => self.next = None,
            PageRel::Last => self.last = None,
        }
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse a page-relation header against the caller's current page.
///
/// An absent or empty header yields an empty mapping. Malformed entries
/// (no `page=` digits, unrecognized rel) are skipped individually and never
/// abort the rest of the header.
///
/// Two suppression passes run after extraction, in this order:
///
/// 1. **Circular**: when `prev` and `next` resolve to the same page (a
///    single-page collection with self-referential neighbor links), both
///    are dropped.
/// 2. **Boundary**: when `current_page` equals the `first` target, `prev`
///    is dropped; when it equals the `last` target, `next` is dropped.
///
/// Pure function: deterministic for the same header and current page.
pub fn parse_links(raw: Option<&str>, current_page: u32) -> PageLinks {
    let mut links = PageLinks::new();

    let Some(raw) = raw else {
        return links;
    };
    if raw.trim().is_empty() {
        return links;
    }

    for entry in raw.split(',') {
        let entry = entry.trim();
        let mut url = None;
        let mut rel = None;

        for segment in entry.split(';') {
            let segment = segment.trim();
            if segment.starts_with('<') && segment.ends_with('>') {
                url = Some(&segment[1..segment.len() - 1]);
            } else if let Some(stripped) = segment.strip_prefix("rel=") {
                rel = Some(stripped.trim_matches('"').trim_matches('\''));
            }
        }

        let (Some(url), Some(rel)) = (url, rel) else {
            continue;
        };
        let Some(rel) = PageRel::from_rel(rel) else {
            continue;
        };
        let Some(page) = extract_page(url) else {
            continue;
        };

        links.set(rel, page);
    }

    // Single-page collections emit identical self-referential prev/next
    // links; drop both. Must run before boundary suppression.
    if let (Some(prev), Some(next)) = (links.prev, links.next) {
        if prev == next {
            links.remove(PageRel::Prev);
            links.remove(PageRel::Next);
        }
    }

    // The client has no real neighbor to request at a boundary.
    if links.first == Some(current_page) {
        links.remove(PageRel::Prev);
    }
    if links.last == Some(current_page) {
        links.remove(PageRel::Next);
    }

    links
}

/// Extract the first run of digits following `page=` in a url
fn extract_page(url: &str) -> Option<u32> {
    PAGE_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
