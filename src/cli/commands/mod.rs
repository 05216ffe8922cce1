//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which loads the
//! config once, captures the global flags in a [`CommandContext`], and
//! routes the subcommand to its implementation.

pub mod clean;
pub mod detect;
pub mod dispatcher;
pub mod display;
pub mod simulate;
pub mod status;

pub use dispatcher::{Command, CommandContext, CommandDispatcher, CommandResult};
