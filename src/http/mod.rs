//! HTTP fetch module
//!
//! Provides the single-page fetch client for paged collections.
//!
//! # Features
//!
//! - **One-shot requests**: exactly one network call per page fetch, no
//!   retries (retry policy, if any, belongs to the caller)
//! - **Uniform outcomes**: transport failures and HTTP error statuses come
//!   back as a [`crate::types::PageStatus`], never as a panic or stray `Err`
//! - **Rate Limiting**: optional token bucket rate limiter using governor

mod client;
mod rate_limit;

pub use client::{FetchClientConfig, FetchClientConfigBuilder, PagedFetchClient};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
