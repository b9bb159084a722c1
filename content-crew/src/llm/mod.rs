//! Chat model client
//!
//! Stages talk to the model through [`ChatModel`] so the pipeline can run
//! against any OpenAI-compatible endpoint, or a stub in tests.

pub mod openai;

use async_trait::async_trait;
use thiserror::Error;

pub use openai::OpenAiChatModel;

/// Text and token usage returned by one model call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("model request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("model API returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("model response had no choices")]
    EmptyResponse,
    #[error("invalid model response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Model identifier, for logs.
    fn model(&self) -> &str;

    /// Send one system + user exchange and return the assistant's reply.
    async fn complete(&self, system: &str, user: &str) -> Result<Completion, LlmError>;
}
