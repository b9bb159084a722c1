//! Workflow utilities for stage, agent and batch execution
//!
//! - **phase**: Stage-level logging around a unit of work
//! - **agent**: Persona tools + model call, with event logging
//! - **batch**: Bounded parallel execution (used for scraping)

pub mod agent;
pub mod batch;
pub mod phase;

// Re-export commonly used types and functions
pub use agent::{build_task_prompt, execute_agent, AgentConfig, AgentRuntime};
pub use batch::{execute_batch, TaskContext};
pub use phase::execute_phase;
