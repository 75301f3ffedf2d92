//! Common types used throughout the timetable client
//!
//! This module contains shared type definitions, type aliases,
//! and the result shape returned by every paged collection read.

use crate::links::PageLinks;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Ordered query parameters.
///
/// Endpoint filters are appended to the wire request in the order supplied,
/// so this is a pair list rather than a map.
pub type QueryPairs = Vec<(String, String)>;

// ============================================================================
// Page Status
// ============================================================================

/// Outcome of a single page request.
///
/// Transport failures and non-success HTTP statuses are values here, not
/// `Err`: the view layer inspects the status and renders accordingly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    /// The page was fetched and decoded.
    Ok,
    /// Transport-level failure with no server response (connection refused,
    /// DNS failure, client-side timeout).
    Timeout,
    /// The server answered with a non-success HTTP status.
    Http(u16),
}

impl PageStatus {
    /// Check if the page was fetched successfully
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Check if this status represents a failure
    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }

    /// The HTTP status code, if the server answered
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Http(code) => Some(*code),
            _ => None,
        }
    }
}

impl std::fmt::Display for PageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Timeout => write!(f, "timeout"),
            Self::Http(code) => write!(f, "http {code}"),
        }
    }
}

// ============================================================================
// Result Page
// ============================================================================

/// One page of a collection: items in server order, parsed neighbor links,
/// and the request outcome.
///
/// Created per response and discarded once the caller has consumed it;
/// `links` is never mutated in place, only replaced wholesale.
#[derive(Debug, Clone)]
pub struct ResultPage<T> {
    /// Items in the order the server returned them (never re-sorted)
    pub items: Vec<T>,
    /// Parsed page relations (empty for aggregated results)
    pub links: PageLinks,
    /// Outcome of the request
    pub status: PageStatus,
}

impl<T> ResultPage<T> {
    /// A successfully fetched page
    pub fn ok(items: Vec<T>, links: PageLinks) -> Self {
        Self {
            items,
            links,
            status: PageStatus::Ok,
        }
    }

    /// An empty page carrying a synthetic timeout status
    pub fn timeout() -> Self {
        Self {
            items: Vec::new(),
            links: PageLinks::default(),
            status: PageStatus::Timeout,
        }
    }

    /// An empty page carrying a non-success HTTP status
    pub fn http(code: u16) -> Self {
        Self {
            items: Vec::new(),
            links: PageLinks::default(),
            status: PageStatus::Http(code),
        }
    }

    /// Check if the page was fetched successfully
    pub fn is_ok(&self) -> bool {
        self.status.is_ok()
    }
}

// ============================================================================
// Collection Items
// ============================================================================

/// An item of a remote collection with a stable identifier.
///
/// The aggregator uses the identifier to drop items the caller already
/// knows. Items without one (`None`) are never excluded.
pub trait CollectionItem {
    /// Stable identifier of this item, if it has one
    fn item_id(&self) -> Option<String>;
}

impl CollectionItem for serde_json::Value {
    fn item_id(&self) -> Option<String> {
        match self.get("id")? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_status() {
        assert!(PageStatus::Ok.is_ok());
        assert!(PageStatus::Timeout.is_err());
        assert!(PageStatus::Http(404).is_err());
        assert_eq!(PageStatus::Http(500).code(), Some(500));
        assert_eq!(PageStatus::Timeout.code(), None);
        assert_eq!(PageStatus::Http(403).to_string(), "http 403");
    }

    #[test]
    fn test_result_page_constructors() {
        let page: ResultPage<JsonValue> = ResultPage::ok(vec![json!({"id": 1})], PageLinks::default());
        assert!(page.is_ok());
        assert_eq!(page.items.len(), 1);

        let page: ResultPage<JsonValue> = ResultPage::timeout();
        assert_eq!(page.status, PageStatus::Timeout);
        assert!(page.items.is_empty());

        let page: ResultPage<JsonValue> = ResultPage::http(503);
        assert_eq!(page.status.code(), Some(503));
    }

    #[test]
    fn test_json_value_item_id() {
        assert_eq!(json!({"id": 42}).item_id(), Some("42".to_string()));
        assert_eq!(json!({"id": "t-7"}).item_id(), Some("t-7".to_string()));
        assert_eq!(json!({"name": "no id"}).item_id(), None);
        assert_eq!(json!({"id": null}).item_id(), None);
    }
}
