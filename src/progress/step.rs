//! Step records.
//!
//! A [`StepRecord`] is one reported event. Records are appended in the
//! order they are reported and never modified afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Status of a reported step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Starting,
    InProgress,
    Completed,
    Failed,
    Skipped,
}

impl StepStatus {
    /// Terminal statuses advance the step counter; intermediate ones do not.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            StepStatus::Completed | StepStatus::Failed | StepStatus::Skipped
        )
    }

    /// Wire name (`in_progress`, `completed`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            StepStatus::Starting => "starting",
            StepStatus::InProgress => "in_progress",
            StepStatus::Completed => "completed",
            StepStatus::Failed => "failed",
            StepStatus::Skipped => "skipped",
        }
    }
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StepStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "starting" => Ok(StepStatus::Starting),
            "in_progress" => Ok(StepStatus::InProgress),
            "completed" => Ok(StepStatus::Completed),
            "failed" => Ok(StepStatus::Failed),
            "skipped" => Ok(StepStatus::Skipped),
            other => Err(format!("unknown step status '{}'", other)),
        }
    }
}

/// Extra data attached to a step.
///
/// The fields the tracker acts on are typed; anything else a caller wants
/// to attach (versions, paths, counters) goes in `extra` and is persisted
/// alongside them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDetails {
    /// Error message; recorded in the error list when the step failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Warning message; recorded in the warning list for any status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,

    /// Phase this step belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,

    /// Advisory step count for a phase.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_steps: Option<u32>,

    /// Caller-supplied phase summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Value>,

    /// Seconds elapsed when the phase completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_duration: Option<i64>,

    /// Any other fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StepDetails {
    /// Empty details.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the error message.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Set the warning message.
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }

    /// Attach an arbitrary field.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }
}

/// One reported step event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRecord {
    /// Step name.
    pub name: String,

    /// Reported status.
    pub status: StepStatus,

    /// When the event was recorded.
    pub timestamp: DateTime<Utc>,

    /// Extra data.
    #[serde(default)]
    pub details: StepDetails,

    /// 1-based step number, assigned before the counter advances.
    pub step_number: u32,
}
