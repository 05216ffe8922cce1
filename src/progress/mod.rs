//! Installation progress tracking.
//!
//! This module provides:
//! - [`ProgressTracker`] for recording step events across phases
//! - [`ProgressState`] and [`StepRecord`], the persisted aggregate
//! - [`ProgressSink`] for observers, and the integration update document
//! - [`InstallSummary`] for end-of-run reporting
//!
//! Only terminal statuses (`completed`, `failed`, `skipped`) advance the
//! step counter. Phase boundaries are pseudo-steps: starting a phase does
//! not count, completing one does.

pub mod config;
pub mod persist;
pub mod sink;
pub mod state;
pub mod step;
pub mod summary;
pub mod tracker;

pub use config::TrackerConfig;
pub use persist::PersistedState;
pub use sink::{IntegrationUpdate, ProgressSink, ProgressSnapshot};
pub use state::{ErrorEntry, ProgressState, WarningEntry};
pub use step::{StepDetails, StepRecord, StepStatus};
pub use summary::{format_elapsed, InstallSummary};
pub use tracker::ProgressTracker;
