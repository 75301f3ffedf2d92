// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # Timetable Client
//!
//! Pagination and multi-page aggregation layer for a course-scheduling
//! collection API.
//!
//! ## Features
//!
//! - **Link Header Parsing**: Decode the API's page-relation header into
//!   first/prev/next/last page numbers, with boundary and self-reference
//!   suppression
//! - **Paged Fetching**: One-shot page requests with a uniform result
//!   shape; transport failures and HTTP errors surface as statuses, not
//!   panics or lost state
//! - **Aggregation**: Walk all pages of a collection into one logical
//!   list, with optional exclusion set and result cap
//! - **View/URL Sync**: Keep several independently-paged list views
//!   reconciled against one shared, human-navigable query string
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use timetable_client::{Aggregator, AggregationRequest, FetchClientConfig, PagedFetchClient, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = PagedFetchClient::new(FetchClientConfig::new("https://api.example.com"))?;
//!
//!     // One page, with its neighbor links
//!     let page = client
//!         .fetch_page::<serde_json::Value>("/teachers", 1, &[])
//!         .await?;
//!     println!("{} items, has next: {}", page.items.len(), page.links.has_next());
//!
//!     // The whole collection
//!     let all = Aggregator::new(&client)
//!         .aggregate::<serde_json::Value>("/teachers", AggregationRequest::new())
//!         .await?;
//!     println!("{} items total", all.items.len());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and type aliases
pub mod types;

/// Page-relation header parsing
pub mod links;

/// HTTP client with rate limiting
pub mod http;

/// Multi-page aggregation
pub mod aggregate;

/// View page state and URL synchronization
pub mod view;

/// Typed models for the scheduling collections
pub mod resources;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use aggregate::{AggregationRequest, Aggregator};
pub use http::{FetchClientConfig, PagedFetchClient};
pub use links::{parse_links, PageLinks, PageRel};
pub use view::{QueryState, ViewPageState, ViewRegistry};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
