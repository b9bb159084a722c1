//! Data structures for content crew runs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The four free-text inputs of one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRequest {
    pub content_type: String,
    pub topic: String,
    pub target_audience: String,
    pub tone: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("'{0}' must not be empty")]
    EmptyField(&'static str),
    #[error("unknown content type '{0}', expected blog, social or email")]
    UnknownContentType(String),
}

impl ContentRequest {
    pub fn new(
        content_type: impl Into<String>,
        topic: impl Into<String>,
        target_audience: impl Into<String>,
        tone: impl Into<String>,
    ) -> Self {
        Self {
            content_type: content_type.into(),
            topic: topic.into(),
            target_audience: target_audience.into(),
            tone: tone.into(),
        }
    }

    /// Every field must contain something other than whitespace.
    pub fn validate(&self) -> Result<(), RequestError> {
        let fields = [
            ("contentType", &self.content_type),
            ("topic", &self.topic),
            ("targetAudience", &self.target_audience),
            ("tone", &self.tone),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(RequestError::EmptyField(name));
            }
        }
        Ok(())
    }
}

/// Formats the interactive CLI offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Blog,
    Social,
    Email,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Blog => "blog",
            ContentType::Social => "social",
            ContentType::Email => "email",
        }
    }
}

impl FromStr for ContentType {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "blog" => Ok(ContentType::Blog),
            "social" => Ok(ContentType::Social),
            "email" => Ok(ContentType::Email),
            _ => Err(RequestError::UnknownContentType(s.trim().to_string())),
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Research,
    Write,
    Edit,
    Optimize,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Stage::Research, Stage::Write, Stage::Edit, Stage::Optimize];

    /// 1-based position in the pipeline
    pub fn number(&self) -> usize {
        match self {
            Stage::Research => 1,
            Stage::Write => 2,
            Stage::Edit => 3,
            Stage::Optimize => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Research => "Research",
            Stage::Write => "Write",
            Stage::Edit => "Edit",
            Stage::Optimize => "Optimize",
        }
    }

    /// Identifier used as the task id in workflow events
    pub fn task_id(&self) -> &'static str {
        match self {
            Stage::Research => "research",
            Stage::Write => "write",
            Stage::Edit => "edit",
            Stage::Optimize => "optimize",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A stage's task, rendered for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageTask {
    pub stage: Stage,
    pub description: String,
    pub expected_output: String,
    /// What the persona's search tool looks up, if it has one
    pub search_query: Option<String>,
}

/// Output of one completed stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOutput {
    pub stage: Stage,
    pub agent: String,
    pub description: String,
    pub raw: String,
}

/// Everything a run produced; `raw` is the last stage's text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewOutput {
    pub tasks_output: Vec<TaskOutput>,
    pub raw: String,
}

impl CrewOutput {
    pub fn from_tasks(tasks_output: Vec<TaskOutput>) -> Self {
        let raw = tasks_output
            .last()
            .map(|task| task.raw.clone())
            .unwrap_or_default();
        Self { tasks_output, raw }
    }

    pub fn stage(&self, stage: Stage) -> Option<&TaskOutput> {
        self.tasks_output.iter().find(|task| task.stage == stage)
    }
}

impl fmt::Display for CrewOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
