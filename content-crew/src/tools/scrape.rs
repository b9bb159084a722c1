//! Website scraping: fetch a page and turn it into Markdown text

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

/// Maximum returned text (100KB)
pub const MAX_OUTPUT_SIZE: usize = 100 * 1024;

const TRUNCATION_MARKER: &str = "\n\n... (content truncated)";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("failed to fetch {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("failed to convert HTML: {0}")]
    Convert(String),
}

#[async_trait]
pub trait PageScraper: Send + Sync {
    async fn scrape(&self, url: &str) -> Result<String, ScrapeError>;
}

pub struct WebScraper {
    client: Client,
}

impl WebScraper {
    pub fn new() -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("content-crew/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| ScrapeError::Request {
                url: String::new(),
                source: e,
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageScraper for WebScraper {
    #[instrument(skip(self))]
    async fn scrape(&self, url: &str) -> Result<String, ScrapeError> {
        let parsed = parse_url(url)?;

        let response = self
            .client
            .get(parsed.as_str())
            .send()
            .await
            .map_err(|source| ScrapeError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let is_html = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| {
                let ct = ct.to_lowercase();
                ct.contains("text/html") || ct.contains("application/xhtml")
            })
            .unwrap_or(true);

        let body = response
            .text()
            .await
            .map_err(|source| ScrapeError::Request {
                url: url.to_string(),
                source,
            })?;
        debug!(bytes = body.len(), is_html, "page fetched");

        let text = if is_html { html_to_text(&body)? } else { body };
        Ok(truncate_output(text))
    }
}

/// Accept absolute http(s) URLs only.
pub fn parse_url(raw: &str) -> Result<Url, ScrapeError> {
    let invalid = |reason: String| ScrapeError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme '{}'", other))),
    }
    if url.host_str().is_none() {
        return Err(invalid("URL has no host".to_string()));
    }
    Ok(url)
}

pub fn html_to_text(html: &str) -> Result<String, ScrapeError> {
    htmd::convert(html)
        .map(|markdown| markdown.trim().to_string())
        .map_err(|e| ScrapeError::Convert(e.to_string()))
}

/// Cap `text` at [`MAX_OUTPUT_SIZE`] bytes without splitting a character.
pub fn truncate_output(text: String) -> String {
    if text.len() <= MAX_OUTPUT_SIZE {
        return text;
    }

    let mut end = MAX_OUTPUT_SIZE;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let mut truncated = text[..end].to_string();
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}
