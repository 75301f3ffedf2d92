//! Single-page fetch client
//!
//! Issues one request against a collection endpoint and returns the page's
//! items plus its parsed neighbor links. Network and timeout failures are
//! wrapped into a uniform [`ResultPage`] shape instead of propagating.

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::error::{Error, Result};
use crate::links::parse_links;
use crate::types::{QueryPairs, ResultPage};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Wire name of the page index parameter. The wire protocol is 0-indexed;
/// the 1-indexed client page is translated here and nowhere else.
const WIRE_PAGE_PARAM: &str = "page";

/// Configuration for the paged fetch client
#[derive(Debug, Clone)]
pub struct FetchClientConfig {
    /// Base URL of the collection API
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Default headers for all requests (e.g. an Authorization bearer)
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
    /// Rate limiter configuration (None disables rate limiting)
    pub rate_limit: Option<RateLimiterConfig>,
}

impl FetchClientConfig {
    /// Create a config with defaults for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
            default_headers: HashMap::new(),
            user_agent: format!("timetable-client/{}", env!("CARGO_PKG_VERSION")),
            rate_limit: None,
        }
    }

    /// Create a new config builder
    pub fn builder(base_url: impl Into<String>) -> FetchClientConfigBuilder {
        FetchClientConfigBuilder {
            config: Self::new(base_url),
        }
    }
}

/// Builder for the fetch client config
pub struct FetchClientConfigBuilder {
    config: FetchClientConfig,
}

impl FetchClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Build the config
    pub fn build(self) -> FetchClientConfig {
        self.config
    }
}

/// Client for fetching single pages of a remote collection.
///
/// Exactly one network call per [`fetch_page`](Self::fetch_page) invocation;
/// no retries are attempted here. Transport failures and non-success HTTP
/// statuses surface as the page's status, never as `Err` (see the error
/// module docs for what `Err` is reserved for).
pub struct PagedFetchClient {
    client: Client,
    config: FetchClientConfig,
    rate_limiter: Option<RateLimiter>,
}

impl PagedFetchClient {
    /// Create a new client, validating the base URL eagerly
    pub fn new(config: FetchClientConfig) -> Result<Self> {
        Url::parse(&config.base_url)?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to build HTTP client");

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            rate_limiter,
        })
    }

    /// The client's configuration
    pub fn config(&self) -> &FetchClientConfig {
        &self.config
    }

    /// Fetch one page of a collection.
    ///
    /// `page` is 1-indexed on the client side; requests below 1 are treated
    /// as page 1. `extra_params` are appended to the wire query after the
    /// page index, in the order supplied.
    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        page: u32,
        extra_params: &[(String, String)],
    ) -> Result<ResultPage<T>> {
        let page = page.max(1);
        let url = self.build_url(endpoint)?;

        let mut query: QueryPairs = vec![(WIRE_PAGE_PARAM.to_string(), (page - 1).to_string())];
        query.extend(extra_params.iter().cloned());

        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }

        let mut req = self.client.get(url.clone()).query(&query);
        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        let response = match req.send().await {
            Ok(response) => response,
            Err(e) => {
                // No server response reached us: connection refused, DNS
                // failure, or the client-side timeout fired.
                warn!("Transport failure for {url}: {e}");
                return Ok(ResultPage::timeout());
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                "Collection request failed: {} {} ({})",
                status.as_u16(),
                url,
                body.trim()
            );
            return Ok(ResultPage::http(status.as_u16()));
        }

        let link_header = response
            .headers()
            .get(reqwest::header::LINK)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let items: Vec<T> = response
            .json()
            .await
            .map_err(|e| Error::decode(format!("Invalid collection body from {url}: {e}")))?;

        let links = parse_links(link_header.as_deref(), page);
        debug!(
            "Fetched page {page} of {endpoint}: {} items, links {links:?}",
            items.len()
        );

        Ok(ResultPage::ok(items, links))
    }

    /// Build full URL from an endpoint path
    fn build_url(&self, endpoint: &str) -> Result<Url> {
        let raw = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else {
            let base = self.config.base_url.trim_end_matches('/');
            let path = endpoint.trim_start_matches('/');
            format!("{base}/{path}")
        };
        Ok(Url::parse(&raw)?)
    }
}

impl std::fmt::Debug for PagedFetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagedFetchClient")
            .field("config", &self.config)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}
