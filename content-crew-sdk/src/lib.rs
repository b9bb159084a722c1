// Re-export the derive macro
pub use content_crew_macros::WorkflowDefinition;

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

/// Prefix that marks a structured event line on stderr.
pub const EVENT_PREFIX: &str = "__CREW_EVENT__:";

static EVENT_OUTPUT: AtomicBool = AtomicBool::new(true);
static CONSOLE_OUTPUT: AtomicBool = AtomicBool::new(true);

/// Enable or disable structured event lines on stderr.
pub fn set_event_output(enabled: bool) {
    EVENT_OUTPUT.store(enabled, Ordering::Relaxed);
}

pub fn event_output_enabled() -> bool {
    EVENT_OUTPUT.load(Ordering::Relaxed)
}

/// Enable or disable the colored console macros.
///
/// Long-running services turn this off and log through `tracing` instead.
pub fn set_console_output(enabled: bool) {
    CONSOLE_OUTPUT.store(enabled, Ordering::Relaxed);
}

pub fn console_output_enabled() -> bool {
    CONSOLE_OUTPUT.load(Ordering::Relaxed)
}

/// Workflow metadata (id, name, description)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowMetadata {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Complete workflow metadata with fields (for JSON export)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullWorkflowMetadata {
    #[serde(flatten)]
    pub metadata: WorkflowMetadata,
    pub fields: Vec<FieldSchema>,
}

/// Field schema definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    pub field_type: FieldType,
    pub label: String,
    pub description: String,
    pub cli_arg: String,
    pub required: bool,
    pub default: Option<String>,
}

/// Field type enum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Flag,
    Number {
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<i64>,
    },
    FilePath {
        #[serde(skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
    },
    Select {
        options: Vec<String>,
    },
}

/// Describes a command-line workflow's inputs (implemented by the derive macro).
pub trait WorkflowDefinition {
    fn metadata() -> WorkflowMetadata;
    fn fields() -> Vec<FieldSchema>;

    fn full_metadata() -> FullWorkflowMetadata
    where
        Self: Sized,
    {
        FullWorkflowMetadata {
            metadata: Self::metadata(),
            fields: Self::fields(),
        }
    }

    /// Print the metadata as pretty JSON on stdout.
    fn print_metadata(&self)
    where
        Self: Sized,
    {
        match serde_json::to_string_pretty(&Self::full_metadata()) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("failed to serialize workflow metadata: {}", e),
        }
    }
}

/// Structured events emitted while a crew runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkflowLog {
    PhaseStarted {
        phase: usize,
        name: String,
        total_phases: usize,
    },
    PhaseCompleted {
        phase: usize,
        name: String,
    },
    PhaseFailed {
        phase: usize,
        name: String,
        error: String,
    },
    /// Persona started working on its task
    AgentStarted {
        task_id: String,
        agent_name: String,
        description: String,
    },
    AgentMessage {
        task_id: String,
        agent_name: String,
        message: String,
    },
    AgentCompleted {
        task_id: String,
        agent_name: String,
        result: Option<String>,
    },
    AgentFailed {
        task_id: String,
        agent_name: String,
        error: String,
    },
    /// A persona ran one of its tools
    ToolUsed {
        task_id: String,
        tool: String,
        input: String,
    },
    /// Output file written
    StateFileCreated {
        file_path: String,
        description: String,
    },
}

impl WorkflowLog {
    /// The stderr line for this event, or `None` if it cannot be serialized.
    pub fn to_line(&self) -> Option<String> {
        serde_json::to_string(self)
            .ok()
            .map(|json| format!("{}{}", EVENT_PREFIX, json))
    }

    /// Emit this event to stderr
    pub fn emit(&self) {
        if !event_output_enabled() {
            return;
        }
        if let Some(line) = self.to_line() {
            use std::io::Write;
            eprintln!("{}", line);
            let _ = std::io::stderr().flush();
        }
    }
}

#[macro_export]
macro_rules! log_phase_start {
    ($phase:expr, $name:expr, $total:expr) => {
        $crate::WorkflowLog::PhaseStarted {
            phase: $phase,
            name: $name.to_string(),
            total_phases: $total,
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_phase_complete {
    ($phase:expr, $name:expr) => {
        $crate::WorkflowLog::PhaseCompleted {
            phase: $phase,
            name: $name.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_phase_failed {
    ($phase:expr, $name:expr, $error:expr) => {
        $crate::WorkflowLog::PhaseFailed {
            phase: $phase,
            name: $name.to_string(),
            error: $error.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_agent_start {
    ($task_id:expr, $agent:expr, $desc:expr) => {
        $crate::WorkflowLog::AgentStarted {
            task_id: $task_id.to_string(),
            agent_name: $agent.to_string(),
            description: $desc.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_agent_message {
    ($task_id:expr, $agent:expr, $msg:expr) => {
        $crate::WorkflowLog::AgentMessage {
            task_id: $task_id.to_string(),
            agent_name: $agent.to_string(),
            message: $msg.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_agent_complete {
    ($task_id:expr, $agent:expr) => {
        $crate::WorkflowLog::AgentCompleted {
            task_id: $task_id.to_string(),
            agent_name: $agent.to_string(),
            result: None,
        }
        .emit();
    };
    ($task_id:expr, $agent:expr, $result:expr) => {
        $crate::WorkflowLog::AgentCompleted {
            task_id: $task_id.to_string(),
            agent_name: $agent.to_string(),
            result: Some($result.to_string()),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_agent_failed {
    ($task_id:expr, $agent:expr, $error:expr) => {
        $crate::WorkflowLog::AgentFailed {
            task_id: $task_id.to_string(),
            agent_name: $agent.to_string(),
            error: $error.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_tool_use {
    ($task_id:expr, $tool:expr, $input:expr) => {
        $crate::WorkflowLog::ToolUsed {
            task_id: $task_id.to_string(),
            tool: $tool.to_string(),
            input: $input.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_state_file {
    ($path:expr, $desc:expr) => {
        $crate::WorkflowLog::StateFileCreated {
            file_path: $path.to_string(),
            description: $desc.to_string(),
        }
        .emit();
    };
}

// ============================================================================
// Console Logging Macros
// ============================================================================
// Colored, human-readable output for the interactive binaries. They are
// silenced by `set_console_output(false)`.
// ============================================================================

/// Logs the start of a stage with a header and description.
///
/// Outputs:
/// ```text
/// ═══ STAGE 1: Research ═══
/// Research Specialist is gathering material
/// ```
#[macro_export]
macro_rules! log_phase_start_console {
    ($phase:expr, $title:expr, $description:expr) => {
        if $crate::console_output_enabled() {
            println!("\x1b[1;36m═══ STAGE {}: {} ═══\x1b[0m", $phase, $title);
            println!("\x1b[36m{}\x1b[0m", $description);
        }
    };
}

/// Outputs `✓ Stage 1 complete`
#[macro_export]
macro_rules! log_phase_complete_console {
    ($phase:expr) => {
        if $crate::console_output_enabled() {
            println!("\x1b[32m✓ Stage {} complete\x1b[0m", $phase);
        }
    };
}

/// Logs model usage for one call.
///
/// Outputs:
/// ```text
/// Statistics: 1250ms (tokens: 1234 in / 567 out)
/// ```
#[macro_export]
macro_rules! log_stats {
    ($duration_ms:expr, $input_tokens:expr, $output_tokens:expr) => {
        if $crate::console_output_enabled() {
            println!(
                "\x1b[2mStatistics: {}ms (tokens: {} in / {} out)\x1b[0m",
                $duration_ms, $input_tokens, $output_tokens
            );
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($message:expr) => {
        if $crate::console_output_enabled() {
            println!("\x1b[36mℹ {}\x1b[0m", $message);
        }
    };
    ($fmt:expr, $($arg:tt)*) => {
        if $crate::console_output_enabled() {
            println!("\x1b[36mℹ {}\x1b[0m", format!($fmt, $($arg)*));
        }
    };
}

#[macro_export]
macro_rules! log_warning {
    ($message:expr) => {
        if $crate::console_output_enabled() {
            println!("\x1b[33m⚠ Warning: {}\x1b[0m", $message);
        }
    };
    ($fmt:expr, $($arg:tt)*) => {
        if $crate::console_output_enabled() {
            println!("\x1b[33m⚠ Warning: {}\x1b[0m", format!($fmt, $($arg)*));
        }
    };
}

/// Errors go to stderr.
#[macro_export]
macro_rules! log_error {
    ($message:expr) => {
        if $crate::console_output_enabled() {
            eprintln!("\x1b[31m❌ {}\x1b[0m", $message);
        }
    };
    ($fmt:expr, $($arg:tt)*) => {
        if $crate::console_output_enabled() {
            eprintln!("\x1b[31m❌ {}\x1b[0m", format!($fmt, $($arg)*));
        }
    };
}

/// Outputs `✓ Saved: ./blog_rust_20250101_120000.md`
#[macro_export]
macro_rules! log_file_saved {
    ($path:expr) => {
        if $crate::console_output_enabled() {
            println!("\x1b[32m✓ Saved: {}\x1b[0m", $path);
        }
    };
}
