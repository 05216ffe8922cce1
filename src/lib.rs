//! installkit - Installation progress tracking and host capability detection.
//!
//! installkit records the progress of a multi-step installation in a
//! persisted, resumable document and detects which host tools an
//! installation still needs.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Optional `installkit.yml` loading
//! - [`detection`] - Host capability probes and the dependency summary
//! - [`error`] - Error types and result aliases
//! - [`progress`] - Step tracking, persistence and observers
//! - [`shell`] - External command execution
//! - [`ui`] - Status icons, theme and progress bar
//!
//! # Example
//!
//! ```
//! use installkit::progress::{ProgressTracker, StepDetails, StepStatus, TrackerConfig};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let mut tracker = ProgressTracker::new(TrackerConfig::new(3).in_dir(dir.path())).unwrap();
//! tracker.start_phase("System Validation", Some(1));
//! tracker.update_progress("Checking admin rights", StepStatus::Completed, StepDetails::new());
//!
//! let summary = tracker.generate_summary();
//! assert!(summary.success);
//! assert_eq!(summary.completed_steps, 1);
//! ```

pub mod cli;
pub mod config;
pub mod detection;
pub mod error;
pub mod progress;
pub mod shell;
pub mod ui;

pub use error::{InstallError, Result};
