//! Progress state aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Phase name before any phase has started.
pub const INITIAL_PHASE: &str = "initialization";

/// Operation label before any step has been reported.
pub const INITIAL_OPERATION: &str = "Starting installation...";

/// An error recorded against a failed step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub step: String,
    pub error: String,
    pub timestamp: DateTime<Utc>,
}

/// A warning recorded against any step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarningEntry {
    pub step: String,
    pub warning: String,
    pub timestamp: DateTime<Utc>,
}

/// Mutable progress aggregate, persisted after every update.
///
/// `current_step` only grows, `overall_progress` is derived from it, and
/// the error and warning lists are append-only. The tracker is the only
/// writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressState {
    /// Current phase name.
    pub phase: String,

    /// Step budget fixed at construction.
    pub total_steps: u32,

    /// Number of terminal-status records.
    pub current_step: u32,

    /// Percent complete, 0-100.
    pub overall_progress: f64,

    /// Name of the most recent step event.
    pub current_operation: String,

    /// Seconds remaining by linear extrapolation (None before the first
    /// terminal step).
    pub estimated_time_remaining: Option<i64>,

    /// Errors in report order.
    pub errors: Vec<ErrorEntry>,

    /// Warnings in report order.
    pub warnings: Vec<WarningEntry>,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ProgressState {
    /// Fresh state for a step budget.
    pub fn new(total_steps: u32) -> Self {
        Self {
            phase: INITIAL_PHASE.to_string(),
            total_steps,
            current_step: 0,
            overall_progress: 0.0,
            current_operation: INITIAL_OPERATION.to_string(),
            estimated_time_remaining: None,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// Percent complete, capped at 100.
pub fn overall_progress(current_step: u32, total_steps: u32) -> f64 {
    if total_steps == 0 {
        return 0.0;
    }
    (f64::from(current_step) / f64::from(total_steps) * 100.0).min(100.0)
}

/// Seconds remaining, extrapolated from the average time per counted step.
///
/// Failed and skipped steps count toward the average like completed ones.
/// Once more steps are counted than budgeted the raw estimate would go
/// negative; it is clamped to zero.
pub fn estimate_time_remaining(
    elapsed_ms: i64,
    current_step: u32,
    total_steps: u32,
) -> Option<i64> {
    if current_step == 0 {
        return None;
    }
    let per_step = elapsed_ms as f64 / f64::from(current_step);
    let remaining_steps = f64::from(total_steps) - f64::from(current_step);
    let seconds = (per_step * remaining_steps / 1000.0).round() as i64;
    Some(seconds.max(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_defaults() {
        let state = ProgressState::new(5);
        assert_eq!(state.phase, "initialization");
        assert_eq!(state.total_steps, 5);
        assert_eq!(state.current_step, 0);
        assert_eq!(state.overall_progress, 0.0);
        assert!(state.estimated_time_remaining.is_none());
        assert!(state.errors.is_empty());
    }

    #[test]
    fn progress_is_percentage() {
        assert_eq!(overall_progress(0, 5), 0.0);
        assert_eq!(overall_progress(4, 5), 80.0);
        assert_eq!(overall_progress(5, 5), 100.0);
    }

    #[test]
    fn progress_caps_at_hundred() {
        assert_eq!(overall_progress(8, 5), 100.0);
    }

    #[test]
    fn estimate_is_none_before_first_step() {
        assert_eq!(estimate_time_remaining(10_000, 0, 5), None);
    }

    #[test]
    fn estimate_extrapolates_linearly() {
        // 2 steps in 10s -> 5s each, 3 left -> 15s
        assert_eq!(estimate_time_remaining(10_000, 2, 5), Some(15));
        assert_eq!(estimate_time_remaining(0, 1, 5), Some(0));
    }

    #[test]
    fn estimate_rounds_to_nearest_second() {
        // 1 step in 1.3s, 1 left -> 1.3s -> 1
        assert_eq!(estimate_time_remaining(1_300, 1, 2), Some(1));
        assert_eq!(estimate_time_remaining(1_600, 1, 2), Some(2));
    }

    #[test]
    fn estimate_clamps_when_over_budget() {
        assert_eq!(estimate_time_remaining(10_000, 7, 5), Some(0));
    }

    #[test]
    fn state_serializes_camel_case() {
        let json = serde_json::to_value(ProgressState::new(3)).unwrap();
        assert_eq!(json["totalSteps"], 3);
        assert_eq!(json["currentOperation"], "Starting installation...");
        assert!(json["estimatedTimeRemaining"].is_null());
    }

    #[test]
    fn state_tolerates_missing_fields() {
        let state: ProgressState = serde_json::from_str(r#"{"totalSteps":4}"#).unwrap();
        assert_eq!(state.total_steps, 4);
        assert_eq!(state.current_step, 0);
        assert_eq!(state.phase, "initialization");
    }
}
