//! The progress tracker.

use std::panic::{catch_unwind, AssertUnwindSafe};

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::Result;
use crate::ui::format_step_line;

use super::config::TrackerConfig;
use super::persist::{load_document, remove_if_present, save_document, PersistedState};
use super::sink::{write_integration_update, ProgressSink, ProgressSnapshot};
use super::state::{
    estimate_time_remaining, overall_progress, ErrorEntry, ProgressState, WarningEntry,
};
use super::step::{StepDetails, StepRecord, StepStatus};
use super::summary::{format_elapsed, round_to_seconds, InstallSummary};

/// Records step events for a multi-step installation.
///
/// Every update is appended to the step history, folded into the
/// [`ProgressState`], persisted to the configured state path, and pushed to
/// registered sinks plus the integration update document. Once constructed
/// the tracker never fails an update: persistence and observer errors are
/// logged and swallowed.
///
/// # Example
///
/// ```
/// use installkit::progress::{ProgressTracker, StepDetails, StepStatus, TrackerConfig};
///
/// let dir = tempfile::tempdir().unwrap();
/// let mut tracker = ProgressTracker::new(TrackerConfig::new(2).in_dir(dir.path())).unwrap();
/// tracker.update_progress("Checking Windows version", StepStatus::Completed, StepDetails::new());
/// assert_eq!(tracker.state().overall_progress, 50.0);
/// ```
pub struct ProgressTracker {
    config: TrackerConfig,
    state: ProgressState,
    steps: Vec<StepRecord>,
    start_time: DateTime<Utc>,
    sinks: Vec<Box<dyn ProgressSink>>,
}

impl std::fmt::Debug for ProgressTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressTracker")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("steps", &self.steps.len())
            .field("start_time", &self.start_time)
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl ProgressTracker {
    /// Start tracking a fresh installation and persist its initial state.
    ///
    /// Fails with `InvalidConfiguration` when `total_steps` is zero.
    pub fn new(config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        let tracker = Self {
            state: ProgressState::new(config.total_steps),
            config,
            steps: Vec::new(),
            start_time: Utc::now(),
            sinks: Vec::new(),
        };
        tracker.persist();
        Ok(tracker)
    }

    /// Restore a tracker from the document at `config.state_path`.
    ///
    /// The step budget comes from the document, not from `config`. Step
    /// history, counters and the original start time are restored, so rate
    /// and elapsed calculations continue from the first run. Returns `None`
    /// if the document is missing or unreadable.
    pub fn load_state(config: TrackerConfig) -> Option<Self> {
        let document = match load_document(&config.state_path) {
            Ok(Some(document)) => document,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Failed to load progress state: {}", e);
                return None;
            }
        };

        let config = TrackerConfig {
            total_steps: document.state.total_steps,
            ..config
        };
        if let Err(e) = config.validate() {
            tracing::warn!(
                "Ignoring progress state at {}: {}",
                config.state_path.display(),
                e
            );
            return None;
        }

        let tracker = Self {
            config,
            state: document.state,
            steps: document.step_details,
            start_time: document.start_time,
            sinks: Vec::new(),
        };
        tracing::debug!(
            "Restored progress at step {}/{}",
            tracker.state.current_step,
            tracker.state.total_steps
        );
        tracker.persist();
        Some(tracker)
    }

    /// Record one step event and return the stored record.
    pub fn update_progress(
        &mut self,
        name: &str,
        status: StepStatus,
        details: StepDetails,
    ) -> StepRecord {
        let timestamp = Utc::now();
        let record = StepRecord {
            name: name.to_string(),
            status,
            timestamp,
            details,
            step_number: self.state.current_step + 1,
        };

        if status.is_terminal() {
            self.state.current_step += 1;
        }
        self.state.overall_progress =
            overall_progress(self.state.current_step, self.state.total_steps);
        self.state.current_operation = name.to_string();
        self.state.estimated_time_remaining = estimate_time_remaining(
            self.elapsed_millis(),
            self.state.current_step,
            self.state.total_steps,
        );

        if status == StepStatus::Failed {
            if let Some(error) = &record.details.error {
                self.state.errors.push(ErrorEntry {
                    step: name.to_string(),
                    error: error.clone(),
                    timestamp,
                });
            }
        }
        if let Some(warning) = &record.details.warning {
            self.state.warnings.push(WarningEntry {
                step: name.to_string(),
                warning: warning.clone(),
                timestamp,
            });
        }

        self.steps.push(record.clone());
        self.persist();
        self.notify(&record);
        self.log_step(&record);
        record
    }

    /// Enter a phase. Records a `starting` event, which does not advance the
    /// step counter.
    pub fn start_phase(&mut self, phase: &str, phase_steps: Option<u32>) -> StepRecord {
        self.state.phase = phase.to_string();
        tracing::info!("Starting phase: {}", phase);
        if let Some(steps) = phase_steps {
            tracing::debug!("Expected steps: {}", steps);
        }

        let details = StepDetails {
            phase: Some(phase.to_string()),
            phase_steps,
            ..StepDetails::default()
        };
        self.update_progress(&format!("Starting {}", phase), StepStatus::Starting, details)
    }

    /// Leave a phase. Records a `completed` event, which consumes one unit of
    /// the step budget.
    pub fn complete_phase(&mut self, phase: &str, summary: Value) -> StepRecord {
        let details = StepDetails {
            phase: Some(phase.to_string()),
            summary: Some(summary),
            phase_duration: Some(self.elapsed_seconds()),
            ..StepDetails::default()
        };
        self.update_progress(&format!("Completed {}", phase), StepStatus::Completed, details)
    }

    /// Register a sink notified on every update.
    pub fn on_progress(&mut self, sink: impl ProgressSink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    /// Write the full progress document to the state path.
    pub fn save_state(&self) -> Result<()> {
        let now = Utc::now();
        let document = PersistedState {
            state: self.state.clone(),
            step_details: self.steps.clone(),
            start_time: self.start_time,
            last_update: now,
            elapsed_time: round_to_seconds((now - self.start_time).num_milliseconds()),
        };
        save_document(&self.config.state_path, &document)
    }

    /// Aggregate outcome so far.
    pub fn generate_summary(&self) -> InstallSummary {
        InstallSummary::from_records(
            self.state.total_steps,
            &self.steps,
            &self.state.errors,
            &self.state.warnings,
            self.elapsed_seconds(),
        )
    }

    /// Delete the state document and the integration update document.
    pub fn cleanup(&self) {
        remove_if_present(&self.config.state_path);
        remove_if_present(&self.config.update_path);
    }

    /// Current progress state.
    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    /// Step history in report order.
    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    /// When tracking started (preserved across restores).
    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Tracker configuration.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Seconds since tracking started, rounded to the nearest second.
    pub fn elapsed_seconds(&self) -> i64 {
        round_to_seconds(self.elapsed_millis())
    }

    /// Elapsed time formatted for display.
    pub fn format_elapsed(&self) -> String {
        format_elapsed(self.elapsed_seconds())
    }

    fn elapsed_millis(&self) -> i64 {
        (Utc::now() - self.start_time).num_milliseconds()
    }

    fn persist(&self) {
        if let Err(e) = self.save_state() {
            tracing::warn!(
                "Failed to save progress state to {}: {}",
                self.config.state_path.display(),
                e
            );
        }
    }

    fn notify(&mut self, record: &StepRecord) {
        let snapshot = ProgressSnapshot {
            progress: self.state.overall_progress,
            step_name: record.name.clone(),
            status: record.status,
            details: record.details.clone(),
            current_step: self.state.current_step,
            total_steps: self.state.total_steps,
            phase: self.state.phase.clone(),
            estimated_time_remaining: self.state.estimated_time_remaining,
        };

        for sink in &mut self.sinks {
            match catch_unwind(AssertUnwindSafe(|| sink.on_progress(&snapshot))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::warn!("Progress sink failed: {:#}", e),
                Err(_) => tracing::warn!("Progress sink panicked"),
            }
        }

        write_integration_update(&self.config.update_path, &snapshot);
    }

    fn log_step(&self, record: &StepRecord) {
        tracing::info!(
            "{}",
            format_step_line(
                record.status,
                self.state.overall_progress,
                &record.name,
                &self.format_elapsed()
            )
        );
        if let Some(warning) = &record.details.warning {
            tracing::warn!("   Warning: {}", warning);
        }
        if record.status == StepStatus::Failed {
            if let Some(error) = &record.details.error {
                tracing::error!("   Error: {}", error);
            }
        }
    }
}
