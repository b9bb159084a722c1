//! Stage execution with automatic logging

use anyhow::Result;
use content_crew_sdk::{
    log_phase_complete, log_phase_complete_console, log_phase_failed, log_phase_start,
    log_phase_start_console,
};
use std::future::Future;

/// Execute one pipeline stage with automatic logging
///
/// Wraps stage execution with:
/// - `log_phase_start` and a console header before execution
/// - `log_phase_complete` on success
/// - `log_phase_failed` on error
///
/// # Arguments
/// - `phase`: 1-based stage number
/// - `name`: Stage name for events and console output
/// - `description`: One line shown under the console header
/// - `total_phases`: Number of stages in the run
/// - `executor`: Async function that performs the work
pub async fn execute_phase<F, Fut, R>(
    phase: usize,
    name: &str,
    description: &str,
    total_phases: usize,
    executor: F,
) -> Result<R>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<R>>,
{
    log_phase_start!(phase, name, total_phases);
    log_phase_start_console!(phase, name, description);

    match executor().await {
        Ok(result) => {
            log_phase_complete!(phase, name);
            log_phase_complete_console!(phase);
            Ok(result)
        }
        Err(e) => {
            log_phase_failed!(phase, name, format!("{:#}", e));
            Err(e)
        }
    }
}
