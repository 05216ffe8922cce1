//! Terminal presentation.
//!
//! This module provides:
//! - [`StatusKind`] icons shared by every status line
//! - [`InstallTheme`] colors, with a plain variant for non-TTY output
//! - [`format_step_line`] for the per-step log line
//! - [`ProgressBarSink`], an indicatif bar that follows a tracker

pub mod icons;
pub mod progress;
pub mod theme;

pub use icons::StatusKind;
pub use progress::{format_duration, format_step_line, ProgressBarSink};
pub use theme::{should_use_colors, InstallTheme};
