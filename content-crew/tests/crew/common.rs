//! Stub collaborators and fixtures shared by the crew tests

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use content_crew::crew::{ContentCrew, ContentRequest, CrewConfig};
use content_crew::llm::{ChatModel, Completion, LlmError};
use content_crew::tools::{
    PageScraper, ScrapeError, SearchError, SearchProvider, SearchResult, Toolbox,
};

/// One recorded model call
#[derive(Debug, Clone)]
pub struct ModelCall {
    pub system: String,
    pub user: String,
}

/// Answers `"<role> output"` and remembers every prompt.
/// Fails for the persona whose role equals `fail_role`.
#[derive(Default)]
pub struct StubModel {
    pub calls: Mutex<Vec<ModelCall>>,
    pub fail_role: Option<&'static str>,
}

impl StubModel {
    pub fn failing_on(role: &'static str) -> Self {
        Self {
            fail_role: Some(role),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<ModelCall> {
        self.calls.lock().unwrap().clone()
    }
}

pub fn role_of(system: &str) -> &str {
    system
        .strip_prefix("You are ")
        .and_then(|rest| rest.split('.').next())
        .unwrap_or("unknown")
}

#[async_trait]
impl ChatModel for StubModel {
    fn model(&self) -> &str {
        "stub-model"
    }

    async fn complete(&self, system: &str, user: &str) -> Result<Completion, LlmError> {
        self.calls.lock().unwrap().push(ModelCall {
            system: system.to_string(),
            user: user.to_string(),
        });

        let role = role_of(system).to_string();
        if self.fail_role == Some(role.as_str()) {
            return Err(LlmError::Api {
                status: 503,
                body: "model overloaded".to_string(),
            });
        }

        Ok(Completion {
            text: format!("{} output", role),
            input_tokens: user.len() as u64,
            output_tokens: 10,
        })
    }
}

/// Returns three results per query; records queries.
#[derive(Default)]
pub struct StubSearch {
    pub queries: Mutex<Vec<(String, usize)>>,
    pub fail: bool,
}

#[async_trait]
impl SearchProvider for StubSearch {
    async fn search(
        &self,
        query: &str,
        num_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        self.queries
            .lock()
            .unwrap()
            .push((query.to_string(), num_results));

        if self.fail {
            return Err(SearchError::QuotaExceeded);
        }

        Ok((1..=3)
            .map(|i| SearchResult {
                position: i,
                title: format!("Result {}", i),
                link: format!("https://example.com/{}", i),
                snippet: format!("Snippet {}", i),
            })
            .collect())
    }
}

/// Returns a page body per URL; URLs ending in `/2` fail.
#[derive(Default)]
pub struct StubScraper {
    pub urls: Mutex<Vec<String>>,
}

#[async_trait]
impl PageScraper for StubScraper {
    async fn scrape(&self, url: &str) -> Result<String, ScrapeError> {
        self.urls.lock().unwrap().push(url.to_string());
        if url.ends_with("/2") {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: 404,
            });
        }
        Ok(format!("Page body of {}", url))
    }
}

pub struct Harness {
    pub crew: ContentCrew,
    pub model: Arc<StubModel>,
    pub search: Arc<StubSearch>,
    pub scraper: Arc<StubScraper>,
}

pub fn harness_with(model: StubModel, search: StubSearch) -> Harness {
    // Keep test output readable
    content_crew_sdk::set_event_output(false);
    content_crew_sdk::set_console_output(false);

    let model = Arc::new(model);
    let search = Arc::new(search);
    let scraper = Arc::new(StubScraper::default());
    let toolbox = Toolbox::new(search.clone(), scraper.clone());
    let crew = ContentCrew::new(model.clone(), toolbox, &CrewConfig::default());

    Harness {
        crew,
        model,
        search,
        scraper,
    }
}

pub fn harness() -> Harness {
    harness_with(StubModel::default(), StubSearch::default())
}

pub fn sample_request() -> ContentRequest {
    ContentRequest::new("blog", "Home composting", "urban gardeners", "casual")
}
