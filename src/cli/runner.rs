//! CLI runner - executes commands

use crate::aggregate::{AggregationRequest, Aggregator};
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::error::{Error, Result};
use crate::http::{FetchClientConfig, PagedFetchClient};
use crate::links::{PageLinks, PageRel};
use crate::resources::{
    Course, Room, ScheduleEntry, Teacher, COURSES_ENDPOINT, ROOMS_ENDPOINT, SCHEDULE_ENDPOINT,
    TEACHERS_ENDPOINT,
};
use crate::types::{JsonValue, QueryPairs, ResultPage};
use serde_json::{json, Value};
use std::time::Duration;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Fetch {
                endpoint,
                page,
                params,
            } => self.fetch(endpoint, *page, params).await,
            Commands::Dump {
                endpoint,
                cap,
                exclude,
                params,
            } => self.dump(endpoint, *cap, exclude, params).await,
        }
    }

    /// Fetch one page and print items plus neighbor links
    async fn fetch(&self, endpoint: &str, page: u32, params: &[String]) -> Result<()> {
        let client = self.build_client()?;
        let params = Self::parse_params(params)?;

        let result = client.fetch_page::<JsonValue>(endpoint, page, &params).await?;
        self.output_page(endpoint, page, &result);
        Ok(())
    }

    /// Aggregate every page and print the merged list
    async fn dump(
        &self,
        endpoint: &str,
        cap: Option<usize>,
        exclude: &[String],
        params: &[String],
    ) -> Result<()> {
        let client = self.build_client()?;

        let mut request = AggregationRequest::new().exclude_all(exclude.iter().cloned());
        for (key, value) in Self::parse_params(params)? {
            request = request.query(key, value);
        }
        if let Some(cap) = cap {
            request = request.cap(cap);
        }

        let result = Aggregator::new(&client)
            .aggregate::<JsonValue>(endpoint, &request)
            .await?;

        match self.cli.format {
            OutputFormat::Json => {
                let msg = json!({
                    "status": result.status.to_string(),
                    "count": result.items.len(),
                    "items": result.items,
                });
                println!("{}", serde_json::to_string(&msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{} ({} items)", endpoint, result.items.len());
                if result.status.is_err() {
                    println!("  status: {}", result.status);
                }
                for item in &result.items {
                    println!("  {}", render_item(endpoint, item));
                }
            }
        }
        Ok(())
    }

    /// Build the API client from flags and environment
    fn build_client(&self) -> Result<PagedFetchClient> {
        let base_url = self
            .cli
            .base_url
            .as_deref()
            .ok_or_else(|| Error::config("Base URL not specified (use -b or TIMETABLE_BASE_URL)"))?;

        let mut builder = FetchClientConfig::builder(base_url)
            .timeout(Duration::from_secs(self.cli.timeout));
        if let Some(token) = &self.cli.token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }

        PagedFetchClient::new(builder.build())
    }

    /// Parse repeated `key=value` arguments into ordered query pairs
    fn parse_params(params: &[String]) -> Result<QueryPairs> {
        params
            .iter()
            .map(|param| {
                param
                    .split_once('=')
                    .map(|(key, value)| (key.to_string(), value.to_string()))
                    .ok_or_else(|| {
                        Error::config(format!("Invalid parameter '{param}' (expected key=value)"))
                    })
            })
            .collect()
    }

    /// Output one fetched page
    fn output_page(&self, endpoint: &str, page: u32, result: &ResultPage<JsonValue>) {
        match self.cli.format {
            OutputFormat::Json => {
                let msg = json!({
                    "page": page,
                    "status": result.status.to_string(),
                    "items": result.items,
                    "links": links_json(&result.links),
                });
                println!("{}", serde_json::to_string(&msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{endpoint} page {page} ({})", result.status);
                for item in &result.items {
                    println!("  {}", render_item(endpoint, item));
                }
                let neighbors = [PageRel::First, PageRel::Prev, PageRel::Next, PageRel::Last]
                    .iter()
                    .filter_map(|rel| {
                        result.links.get(*rel).map(|p| format!("{}={p}", rel.as_str()))
                    })
                    .collect::<Vec<_>>();
                if !neighbors.is_empty() {
                    println!("  links: {}", neighbors.join(" "));
                }
            }
        }
    }
}

/// Neighbor links as a JSON object (present relations only)
fn links_json(links: &PageLinks) -> Value {
    let mut obj = serde_json::Map::new();
    for rel in [PageRel::First, PageRel::Prev, PageRel::Next, PageRel::Last] {
        if let Some(page) = links.get(rel) {
            obj.insert(rel.as_str().to_string(), json!(page));
        }
    }
    Value::Object(obj)
}

/// Render an item for pretty output, typed for known collections
fn render_item(endpoint: &str, item: &JsonValue) -> String {
    let rendered = match endpoint {
        TEACHERS_ENDPOINT => serde_json::from_value::<Teacher>(item.clone())
            .map(|t| t.to_string())
            .ok(),
        ROOMS_ENDPOINT => serde_json::from_value::<Room>(item.clone())
            .map(|r| r.to_string())
            .ok(),
        COURSES_ENDPOINT => serde_json::from_value::<Course>(item.clone())
            .map(|c| c.to_string())
            .ok(),
        SCHEDULE_ENDPOINT => serde_json::from_value::<ScheduleEntry>(item.clone())
            .map(|e| e.to_string())
            .ok(),
        _ => None,
    };
    rendered.unwrap_or_else(|| serde_json::to_string(item).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_params_preserves_order() {
        let params = vec!["verified=true".to_string(), "filter=phys".to_string()];
        let pairs = Runner::parse_params(&params).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("verified".to_string(), "true".to_string()),
                ("filter".to_string(), "phys".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_params_rejects_missing_separator() {
        let params = vec!["verified".to_string()];
        assert!(Runner::parse_params(&params).is_err());
    }

    #[test]
    fn test_render_item_typed_and_fallback() {
        let teacher = json!({"id": 1, "name": "Ada Lovelace", "short_name": "AL"});
        assert_eq!(render_item(TEACHERS_ENDPOINT, &teacher), "Ada Lovelace (AL)");

        let unknown = json!({"id": 1});
        assert_eq!(render_item("/other", &unknown), "{\"id\":1}");
    }
}
