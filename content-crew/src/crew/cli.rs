//! CLI argument parsing and interactive prompts for the content crew

use anyhow::{bail, Context, Result};
use clap::Parser;
use content_crew_sdk::WorkflowDefinition;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::ConfigError;
use crate::crew::types::{ContentRequest, ContentType, RequestError};
use crate::crew::workflow::CrewConfig;
use crate::llm::openai::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::llm::LlmError;
use crate::tools::{ScrapeError, SearchError};

/// Content Crew CLI Arguments
#[derive(Parser, Debug, Clone, WorkflowDefinition)]
#[command(name = "content-crew", about = "Generate blog posts, social posts and emails with a crew of AI personas")]
#[workflow(
    id = "content_crew",
    name = "Content Creation Crew",
    description = "Sequential content pipeline: Research → Write → Edit → SEO optimize"
)]
pub struct Args {
    /// Kind of content to create (blog, social, email)
    #[arg(short = 't', long)]
    #[field(
        label = "Content Type",
        description = "[SELECT] What type of content to create",
        type = "select",
        options = "blog,social,email"
    )]
    pub content_type: Option<String>,

    /// Topic the content should cover
    #[arg(long)]
    #[field(label = "Topic", description = "[TEXT] What the content is about")]
    pub topic: Option<String>,

    /// Who the content is written for
    #[arg(short, long)]
    #[field(label = "Target Audience", description = "[TEXT] Who will read the content")]
    pub audience: Option<String>,

    /// Tone of voice (e.g. professional, casual, humorous)
    #[arg(long)]
    #[field(label = "Tone", description = "[TEXT] professional, casual, humorous, ...")]
    pub tone: Option<String>,

    /// Directory the Markdown file is written to
    #[arg(short, long, default_value = ".")]
    #[field(
        label = "Output Directory",
        description = "[PATH] Where to save the generated Markdown",
        type = "file_path"
    )]
    pub output_dir: PathBuf,

    /// Also save every stage's output as a YAML run record
    #[arg(long)]
    #[field(label = "Save Stages", description = "[FLAG] Write content_run_*.yaml next to the content")]
    pub save_stages: bool,

    /// Chat model to use
    #[arg(long, env = "CONTENT_CREW_MODEL", default_value = DEFAULT_MODEL)]
    #[field(label = "Model", description = "[TEXT] Chat model identifier")]
    pub model: String,

    /// Base URL of an OpenAI-compatible API (e.g. http://localhost:11434/v1 for Ollama)
    #[arg(long, env = "CONTENT_CREW_BASE_URL", default_value = DEFAULT_BASE_URL)]
    #[field(label = "API Base URL", description = "[TEXT] OpenAI-compatible endpoint")]
    pub base_url: String,

    /// Search results the researcher reads
    #[arg(long, default_value = "5")]
    #[field(
        label = "Search Results",
        description = "[NUMBER] Results per search (1-10)",
        type = "number",
        min = "1",
        max = "10"
    )]
    pub search_results: usize,

    /// Top results the researcher scrapes
    #[arg(long, default_value = "2")]
    #[field(
        label = "Pages to Scrape",
        description = "[NUMBER] Search results to scrape (0-5)",
        type = "number",
        min = "0",
        max = "5"
    )]
    pub scrape_limit: usize,

    /// Emit structured workflow events on stderr
    #[arg(long)]
    #[field(label = "Workflow Events", description = "[FLAG] Machine-readable progress lines on stderr")]
    pub events: bool,

    // Hidden metadata flag
    #[arg(long, hide = true)]
    #[field(skip)]
    pub workflow_metadata: bool,
}

impl From<&Args> for CrewConfig {
    fn from(args: &Args) -> Self {
        CrewConfig {
            model: args.model.clone(),
            base_url: args.base_url.clone(),
            search_results: args.search_results,
            scrape_limit: args.scrape_limit,
            ..CrewConfig::default()
        }
    }
}

const CONTENT_TYPE_QUESTION: &str =
    "What type of content would you like to create? (blog/social/email): ";

/// Asks for the request fields on `W`, reading answers from `R`
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `question` and read one trimmed line.
    pub fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        if read == 0 {
            bail!("Input closed before all questions were answered");
        }
        Ok(line.trim().to_string())
    }

    /// Ask until the answer is non-empty.
    pub fn ask_required(&mut self, question: &str) -> Result<String> {
        loop {
            let answer = self.ask(question)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            writeln!(self.output, "Please enter a value.")?;
        }
    }

    pub fn ask_content_type(&mut self) -> Result<ContentType> {
        let mut question = format!("\n{}", CONTENT_TYPE_QUESTION);
        loop {
            let answer = self.ask(&question)?;
            match answer.parse::<ContentType>() {
                Ok(content_type) => return Ok(content_type),
                Err(_) => {
                    writeln!(self.output, "Please enter 'blog', 'social', or 'email'")?;
                    question = CONTENT_TYPE_QUESTION.to_string();
                }
            }
        }
    }

    /// Prompt for every field `args` did not already supply.
    pub fn collect_request(&mut self, args: &Args) -> Result<ContentRequest> {
        let content_type = match args.content_type.as_deref() {
            Some(value) => value
                .parse::<ContentType>()
                .context("Invalid --content-type")?,
            None => self.ask_content_type()?,
        };

        let topic = self.field_or_ask(
            &args.topic,
            "\nWhat topic would you like the content to cover? ",
        )?;
        let target_audience = self.field_or_ask(
            &args.audience,
            "\nWho is the target audience for this content? ",
        )?;
        let tone = self.field_or_ask(
            &args.tone,
            "\nWhat tone should the content have? (e.g., professional, casual, humorous): ",
        )?;

        Ok(ContentRequest::new(
            content_type.as_str(),
            topic,
            target_audience,
            tone,
        ))
    }

    fn field_or_ask(&mut self, value: &Option<String>, question: &str) -> Result<String> {
        match value.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => Ok(value.to_string()),
            _ => self.ask_required(question),
        }
    }
}

/// Name of the innermost error in `err`'s chain that this crate knows about
pub fn error_kind(err: &anyhow::Error) -> &'static str {
    err.chain()
        .filter_map(|cause| {
            if cause.is::<LlmError>() {
                Some("LlmError")
            } else if cause.is::<SearchError>() {
                Some("SearchError")
            } else if cause.is::<ScrapeError>() {
                Some("ScrapeError")
            } else if cause.is::<ConfigError>() {
                Some("ConfigError")
            } else if cause.is::<RequestError>() {
                Some("RequestError")
            } else if cause.is::<std::io::Error>() {
                Some("IoError")
            } else {
                None
            }
        })
        .last()
        .unwrap_or("Error")
}
