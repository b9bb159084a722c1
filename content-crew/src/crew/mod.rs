//! Content creation crew
//!
//! Four personas turn a content request into finished text: research, write,
//! edit, then SEO optimization. Stage prompts live in the `phase*` modules;
//! [`workflow`] runs them in order and [`output`] writes the result to disk.

pub mod cli;
pub mod output;
pub mod personas;
pub mod phase0_research;
pub mod phase1_write;
pub mod phase2_edit;
pub mod phase3_optimize;
pub mod types;
pub mod workflow;

// Re-export commonly used types
pub use types::{ContentRequest, ContentType, CrewOutput, RequestError, Stage, StageTask, TaskOutput};
pub use workflow::{ContentCrew, CrewConfig};
