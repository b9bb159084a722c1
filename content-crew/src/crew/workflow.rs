//! Pipeline orchestration for the content crew
//!
//! [`ContentCrew::kickoff`] runs the four stages strictly in order. Each stage
//! gets the previous stage's output as context, and the first failure ends the
//! run.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::config::ApiKeys;
use crate::crew::{
    phase0_research, phase1_write, phase2_edit, phase3_optimize,
    types::{ContentRequest, CrewOutput, Stage, StageTask, TaskOutput},
};
use crate::llm::{
    openai::{DEFAULT_BASE_URL, DEFAULT_MODEL},
    ChatModel, OpenAiChatModel,
};
use crate::tools::Toolbox;
use crate::workflow_utils::{execute_agent, execute_phase, AgentConfig, AgentRuntime};

/// Configuration for a content crew
///
/// # Examples
///
/// ```no_run
/// use content_crew::crew::CrewConfig;
///
/// let config = CrewConfig {
///     model: "llama3.2".to_string(),
///     base_url: "http://localhost:11434/v1".to_string(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CrewConfig {
    /// Chat model identifier
    pub model: String,
    /// Base URL of an OpenAI-compatible API
    pub base_url: String,
    pub temperature: f32,
    /// Results requested from the search tool
    pub search_results: usize,
    /// Top search results the researcher scrapes
    pub scrape_limit: usize,
}

impl Default for CrewConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: 0.7,
            search_results: 5,
            scrape_limit: 2,
        }
    }
}

/// The rendered task for `stage`
pub fn stage_task(stage: Stage, request: &ContentRequest) -> StageTask {
    match stage {
        Stage::Research => phase0_research::task(request),
        Stage::Write => phase1_write::task(request),
        Stage::Edit => phase2_edit::task(request),
        Stage::Optimize => phase3_optimize::task(request),
    }
}

/// Four personas run in sequence: research → write → edit → optimize
pub struct ContentCrew {
    runtime: AgentRuntime,
}

impl ContentCrew {
    pub fn new(model: Arc<dyn ChatModel>, toolbox: Toolbox, config: &CrewConfig) -> Self {
        Self {
            runtime: AgentRuntime {
                model,
                toolbox,
                search_results: config.search_results,
                scrape_limit: config.scrape_limit,
            },
        }
    }

    /// Build a crew with the live OpenAI-compatible model and Serper tools
    pub fn from_config(keys: &ApiKeys, config: &CrewConfig) -> Result<Self> {
        let model = OpenAiChatModel::new(&config.base_url, &keys.openai, &config.model)
            .context("Failed to create chat model client")?
            .with_temperature(config.temperature);
        let toolbox = Toolbox::live(&keys.serper).context("Failed to create tools")?;
        Ok(Self::new(Arc::new(model), toolbox, config))
    }

    pub fn model_name(&self) -> &str {
        self.runtime.model.model()
    }

    /// Run the whole pipeline for one request
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A request field is blank (nothing runs)
    /// - Any stage's model call fails (later stages do not run)
    #[instrument(skip_all, fields(content_type = %request.content_type, topic = %request.topic))]
    pub async fn kickoff(&self, request: &ContentRequest) -> Result<CrewOutput> {
        request.validate().context("Invalid content request")?;

        let total = Stage::ALL.len();
        let mut tasks_output: Vec<TaskOutput> = Vec::with_capacity(total);
        let mut context: Option<String> = None;

        for stage in Stage::ALL {
            let task = stage_task(stage, request);
            let persona = stage.persona();
            let description = task.description.clone();
            let headline = format!("{} is working on the {} stage", persona.role, stage);

            let raw = execute_phase(stage.number(), stage.name(), &headline, total, || {
                execute_agent(&self.runtime, AgentConfig::for_task(task, context.take()))
            })
            .await
            .with_context(|| format!("Stage {} ({}) failed", stage.number(), stage))?;

            info!(stage = %stage, chars = raw.len(), "stage complete");
            context = Some(raw.clone());
            tasks_output.push(TaskOutput {
                stage,
                agent: persona.role.to_string(),
                description,
                raw,
            });
        }

        Ok(CrewOutput::from_tasks(tasks_output))
    }
}
