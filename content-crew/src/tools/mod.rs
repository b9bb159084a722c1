//! Tools a persona can run before its model call

pub mod scrape;
pub mod search;

use std::fmt;
use std::sync::Arc;

pub use scrape::{PageScraper, ScrapeError, WebScraper};
pub use search::{SearchError, SearchProvider, SearchResult, SerperSearch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Search,
    Scrape,
}

impl ToolKind {
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Search => "search",
            ToolKind::Scrape => "scrape",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shared tool implementations handed to every stage
#[derive(Clone)]
pub struct Toolbox {
    pub search: Arc<dyn SearchProvider>,
    pub scraper: Arc<dyn PageScraper>,
}

impl Toolbox {
    pub fn new(search: Arc<dyn SearchProvider>, scraper: Arc<dyn PageScraper>) -> Self {
        Self { search, scraper }
    }

    /// Serper search plus the HTTP scraper.
    pub fn live(serper_key: &str) -> anyhow::Result<Self> {
        Ok(Self {
            search: Arc::new(SerperSearch::new(serper_key)?),
            scraper: Arc::new(WebScraper::new()?),
        })
    }
}
