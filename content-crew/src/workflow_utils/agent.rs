//! Agent execution: run a persona's tools, then its model call

use anyhow::{Context, Result};
use content_crew_sdk::{
    log_agent_complete, log_agent_failed, log_agent_message, log_agent_start, log_stats,
    log_tool_use, log_warning,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::crew::personas::Persona;
use crate::crew::types::StageTask;
use crate::llm::ChatModel;
use crate::tools::{search::render_results, PageScraper, ToolKind, Toolbox};
use crate::workflow_utils::batch::execute_batch;

/// Everything an agent needs to do its work, shared across stages
#[derive(Clone)]
pub struct AgentRuntime {
    pub model: Arc<dyn ChatModel>,
    pub toolbox: Toolbox,
    /// Results requested from the search tool
    pub search_results: usize,
    /// How many search results the scrape tool fetches
    pub scrape_limit: usize,
}

/// Configuration for agent execution
pub struct AgentConfig {
    /// Task ID this agent belongs to
    pub task_id: String,
    /// Agent name (for logging)
    pub agent_name: String,
    pub persona: &'static Persona,
    pub task: StageTask,
    /// Output of the previous stage
    pub context: Option<String>,
}

impl AgentConfig {
    /// Bind a stage's task to that stage's persona
    pub fn for_task(task: StageTask, context: Option<String>) -> Self {
        let persona = task.stage.persona();
        Self {
            task_id: task.stage.task_id().to_string(),
            agent_name: persona.role.to_string(),
            persona,
            task,
            context,
        }
    }
}

/// Run one agent and return its final text
///
/// Handles:
/// - Agent start/complete/failed logging
/// - Running the persona's search and scrape tools
/// - Prompt assembly (task, expected output, context, observations)
/// - Model call and token statistics
///
/// Tool failures become observations; only a model failure is an error.
pub async fn execute_agent(runtime: &AgentRuntime, config: AgentConfig) -> Result<String> {
    log_agent_start!(
        &config.task_id,
        &config.agent_name,
        format!("{} stage", config.task.stage)
    );

    let observations = gather_observations(runtime, &config).await;
    let prompt = build_task_prompt(&config.task, config.context.as_deref(), &observations);
    let system = config.persona.system_prompt();

    let started = Instant::now();
    let completion = match runtime.model.complete(&system, &prompt).await {
        Ok(completion) => completion,
        Err(e) => {
            log_agent_failed!(&config.task_id, &config.agent_name, e.to_string());
            return Err(e).with_context(|| {
                format!("{} failed on the {} stage", config.agent_name, config.task.stage)
            });
        }
    };

    let duration_ms = started.elapsed().as_millis() as u64;
    info!(
        task = %config.task_id,
        model = runtime.model.model(),
        duration_ms,
        input_tokens = completion.input_tokens,
        output_tokens = completion.output_tokens,
        "agent finished"
    );
    log_stats!(duration_ms, completion.input_tokens, completion.output_tokens);
    log_agent_complete!(
        &config.task_id,
        &config.agent_name,
        format!("{} chars", completion.text.len())
    );

    Ok(completion.text)
}

/// Run the persona's tools and describe what they returned
async fn gather_observations(runtime: &AgentRuntime, config: &AgentConfig) -> Vec<String> {
    let mut observations = Vec::new();
    let mut links = Vec::new();

    let query = config
        .task
        .search_query
        .as_deref()
        .filter(|_| config.persona.uses(ToolKind::Search));
    if let Some(query) = query {
        log_tool_use!(&config.task_id, ToolKind::Search, query);
        match runtime
            .toolbox
            .search
            .search(query, runtime.search_results)
            .await
        {
            Ok(results) => {
                log_agent_message!(
                    &config.task_id,
                    &config.agent_name,
                    format!("🌐 {} results for \"{}\"", results.len(), query)
                );
                links = results
                    .iter()
                    .map(|r| r.link.clone())
                    .filter(|link| link.starts_with("http"))
                    .collect();
                observations.push(format!(
                    "Search results for \"{}\":\n{}",
                    query,
                    render_results(&results)
                ));
            }
            Err(e) => {
                warn!(task = %config.task_id, error = %e, "search failed");
                log_warning!("Search for \"{}\" failed: {}", query, e);
                observations.push(format!("Search for \"{}\" failed: {}", query, e));
            }
        }
    }

    if config.persona.uses(ToolKind::Scrape) && runtime.scrape_limit > 0 && !links.is_empty() {
        links.truncate(runtime.scrape_limit);
        for link in &links {
            log_tool_use!(&config.task_id, ToolKind::Scrape, link);
        }
        let pages = scrape_pages(
            runtime.toolbox.scraper.clone(),
            config.task.stage.number(),
            links,
            runtime.scrape_limit,
        )
        .await;
        observations.extend(pages);
    }

    observations
}

async fn scrape_pages(
    scraper: Arc<dyn PageScraper>,
    phase: usize,
    links: Vec<String>,
    concurrency: usize,
) -> Vec<String> {
    let result = execute_batch(phase, links, concurrency, move |link, _ctx| {
        let scraper = scraper.clone();
        async move {
            let observation = match scraper.scrape(&link).await {
                Ok(text) => format!("Content of {}:\n{}", link, text),
                Err(e) => {
                    warn!(url = %link, error = %e, "scrape failed");
                    format!("Could not scrape {}: {}", link, e)
                }
            };
            Ok(observation)
        }
    })
    .await;

    // Every task above returns Ok, so an error here means the batch itself broke.
    result.unwrap_or_else(|e| vec![format!("Scraping failed: {}", e)])
}

/// Assemble the user message for one stage
pub fn build_task_prompt(task: &StageTask, context: Option<&str>, observations: &[String]) -> String {
    let mut prompt = format!(
        "{}\n\nExpected output:\n{}",
        task.description.trim(),
        task.expected_output.trim()
    );

    if let Some(context) = context.filter(|c| !c.trim().is_empty()) {
        prompt.push_str("\n\nContext from the previous task:\n");
        prompt.push_str(context.trim());
    }

    if !observations.is_empty() {
        prompt.push_str("\n\nTool observations:\n");
        prompt.push_str(&observations.join("\n\n"));
    }

    prompt
}
