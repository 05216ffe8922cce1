//! Progress observers.
//!
//! Every update produces a [`ProgressSnapshot`] that is handed to each
//! registered [`ProgressSink`] and written, with a timestamp, to the
//! integration update document polled by external UIs.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::step::{StepDetails, StepStatus};

/// Point-in-time view of the tracker handed to observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    /// Percent complete, 0-100.
    pub progress: f64,
    /// Name of the reported step.
    pub step_name: String,
    /// Reported status.
    pub status: StepStatus,
    /// Details attached to the step.
    pub details: StepDetails,
    /// Terminal steps counted so far.
    pub current_step: u32,
    /// Step budget.
    pub total_steps: u32,
    /// Current phase.
    pub phase: String,
    /// Seconds remaining, if an estimate exists.
    pub estimated_time_remaining: Option<i64>,
}

/// Receives a snapshot on every progress update.
///
/// Errors and panics from a sink are logged by the tracker and never reach
/// the caller of `update_progress`; the remaining sinks still run.
pub trait ProgressSink: Send {
    fn on_progress(&mut self, snapshot: &ProgressSnapshot) -> anyhow::Result<()>;
}

impl<F> ProgressSink for F
where
    F: FnMut(&ProgressSnapshot) -> anyhow::Result<()> + Send,
{
    fn on_progress(&mut self, snapshot: &ProgressSnapshot) -> anyhow::Result<()> {
        self(snapshot)
    }
}

/// Document written to the integration update path on every update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationUpdate {
    pub timestamp: DateTime<Utc>,
    pub progress: f64,
    pub step: String,
    pub status: StepStatus,
    pub phase: String,
    pub current_step: u32,
    pub total_steps: u32,
    pub estimated_time_remaining: Option<i64>,
    pub details: StepDetails,
}

impl IntegrationUpdate {
    /// Stamp a snapshot with the current time.
    pub fn from_snapshot(snapshot: &ProgressSnapshot) -> Self {
        Self {
            timestamp: Utc::now(),
            progress: snapshot.progress,
            step: snapshot.step_name.clone(),
            status: snapshot.status,
            phase: snapshot.phase.clone(),
            current_step: snapshot.current_step,
            total_steps: snapshot.total_steps,
            estimated_time_remaining: snapshot.estimated_time_remaining,
            details: snapshot.details.clone(),
        }
    }
}

/// Overwrite the integration update document.
///
/// Failures are logged at debug level and otherwise ignored.
pub fn write_integration_update(path: &Path, snapshot: &ProgressSnapshot) {
    let update = IntegrationUpdate::from_snapshot(snapshot);
    let result = serde_json::to_string_pretty(&update)
        .map_err(anyhow::Error::from)
        .and_then(|content| fs::write(path, content).map_err(anyhow::Error::from));
    if let Err(e) = result {
        tracing::debug!("Could not write update file {}: {}", path.display(), e);
    }
}
