//! End-of-run summary.

use serde::{Deserialize, Serialize};

use super::state::{ErrorEntry, WarningEntry};
use super::step::{StepRecord, StepStatus};

/// Aggregate outcome of a tracked installation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallSummary {
    pub total_steps: u32,
    pub completed_steps: usize,
    pub failed_steps: usize,
    pub skipped_steps: usize,
    /// Elapsed time formatted for display (`42s`, `3m 5s`).
    pub total_time: String,
    pub elapsed_seconds: i64,
    /// True when no step failed.
    pub success: bool,
    pub errors: Vec<ErrorEntry>,
    pub warnings: Vec<WarningEntry>,
    pub step_details: Vec<StepRecord>,
}

impl InstallSummary {
    /// Build a summary from the step history.
    pub fn from_records(
        total_steps: u32,
        records: &[StepRecord],
        errors: &[ErrorEntry],
        warnings: &[WarningEntry],
        elapsed_seconds: i64,
    ) -> Self {
        let count = |status: StepStatus| records.iter().filter(|r| r.status == status).count();
        let failed_steps = count(StepStatus::Failed);

        Self {
            total_steps,
            completed_steps: count(StepStatus::Completed),
            failed_steps,
            skipped_steps: count(StepStatus::Skipped),
            total_time: format_elapsed(elapsed_seconds),
            elapsed_seconds,
            success: failed_steps == 0,
            errors: errors.to_vec(),
            warnings: warnings.to_vec(),
            step_details: records.to_vec(),
        }
    }
}

/// Milliseconds rounded to the nearest whole second.
pub fn round_to_seconds(millis: i64) -> i64 {
    (millis as f64 / 1000.0).round() as i64
}

/// Format whole seconds as `Ns` below a minute, else `Nm Ns`.
pub fn format_elapsed(seconds: i64) -> String {
    let seconds = seconds.max(0);
    if seconds < 60 {
        format!("{}s", seconds)
    } else {
        format!("{}m {}s", seconds / 60, seconds % 60)
    }
}
