//! Web search through the Serper API

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tokio::time;
use tracing::{info, instrument, warn};

pub const SERPER_ENDPOINT: &str = "https://google.serper.dev/search";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const RETRY_BASE_DELAY: Duration = Duration::from_secs(1);
const MAX_RETRIES: u32 = 2;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    RequestFailed(String),
    #[error("search request timed out")]
    Timeout,
    #[error("search API quota exceeded")]
    QuotaExceeded,
    #[error("invalid search API key")]
    InvalidApiKey,
    #[error("search request rejected with HTTP {0}")]
    Rejected(u16),
    #[error("failed to parse search response: {0}")]
    InvalidResponse(String),
}

impl SearchError {
    /// Whether another attempt could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, SearchError::RequestFailed(_) | SearchError::Timeout)
    }
}

/// One organic result, numbered from 1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub position: usize,
    pub title: String,
    pub link: String,
    pub snippet: String,
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, num_results: usize)
        -> Result<Vec<SearchResult>, SearchError>;
}

pub struct SerperSearch {
    client: Client,
    api_key: String,
    endpoint: String,
    retry_base_delay: Duration,
}

impl SerperSearch {
    pub fn new(api_key: impl Into<String>) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SearchError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: SERPER_ENDPOINT.to_string(),
            retry_base_delay: RETRY_BASE_DELAY,
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Delay before the first retry; doubles on each further attempt.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    async fn execute_search(&self, query: &str, num_results: usize) -> Result<Value, SearchError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("X-API-KEY", &self.api_key)
            .json(&serde_json::json!({
                "q": query,
                "num": num_results,
            }))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout
                } else {
                    SearchError::RequestFailed(e.to_string())
                }
            })?;

        match response.status() {
            StatusCode::OK => response
                .json()
                .await
                .map_err(|e| SearchError::InvalidResponse(e.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(SearchError::InvalidApiKey),
            StatusCode::TOO_MANY_REQUESTS => Err(SearchError::QuotaExceeded),
            status if status.is_client_error() => Err(SearchError::Rejected(status.as_u16())),
            status => Err(SearchError::RequestFailed(format!("HTTP {}", status))),
        }
    }
}

#[async_trait]
impl SearchProvider for SerperSearch {
    #[instrument(skip(self))]
    async fn search(
        &self,
        query: &str,
        num_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let mut retries = 0;

        loop {
            match self.execute_search(query, num_results).await {
                Ok(body) => {
                    let results = format_organic_results(&body, num_results);
                    info!(count = results.len(), "search complete");
                    return Ok(results);
                }
                Err(e) if e.is_transient() && retries < MAX_RETRIES => {
                    let delay = self.retry_base_delay * 2u32.pow(retries);
                    warn!(error = %e, attempt = retries + 1, ?delay, "search failed, retrying");
                    time::sleep(delay).await;
                    retries += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Take the first `num_results` entries of `organic`, filling in missing fields.
pub fn format_organic_results(body: &Value, num_results: usize) -> Vec<SearchResult> {
    let Some(organic) = body.get("organic").and_then(Value::as_array) else {
        return Vec::new();
    };

    let field = |entry: &Value, key: &str, fallback: &str| {
        entry
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or(fallback)
            .to_string()
    };

    organic
        .iter()
        .take(num_results)
        .enumerate()
        .map(|(i, entry)| SearchResult {
            position: i + 1,
            title: field(entry, "title", "No title"),
            link: field(entry, "link", "No link"),
            snippet: field(entry, "snippet", "No snippet"),
        })
        .collect()
}

/// Plain-text listing used both in prompts and on the console.
pub fn render_results(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return "No results found.".to_string();
    }

    results
        .iter()
        .map(|r| format!("{}. {}\nURL: {}\nSnippet: {}", r.position, r.title, r.link, r.snippet))
        .collect::<Vec<_>>()
        .join("\n\n")
}
