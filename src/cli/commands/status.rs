//! Status command implementation.
//!
//! The `installkit status` command shows the recorded installation progress
//! without modifying the progress document.

use std::io::Write;

use crate::cli::args::StatusArgs;
use crate::error::Result;
use crate::progress::persist::load_document;
use crate::progress::InstallSummary;

use super::dispatcher::{Command, CommandContext, CommandResult};
use super::display;

/// Message printed when no progress document exists.
pub const NO_PROGRESS_MESSAGE: &str = "No installation progress recorded";

/// The status command implementation.
pub struct StatusCommand {
    context: CommandContext,
    args: StatusArgs,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(context: CommandContext, args: StatusArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &StatusArgs {
        &self.args
    }
}

impl Command for StatusCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let config = self.context.config.tracker_config(&self.context.overrides)?;
        let Some(document) = load_document(&config.state_path)? else {
            writeln!(out, "{}", NO_PROGRESS_MESSAGE)?;
            return Ok(CommandResult::success());
        };

        let summary = InstallSummary::from_records(
            document.state.total_steps,
            &document.step_details,
            &document.state.errors,
            &document.state.warnings,
            document.elapsed_time,
        );

        if self.args.json {
            let json = serde_json::json!({
                "progress": document,
                "summary": summary,
            });
            let text = serde_json::to_string_pretty(&json).map_err(anyhow::Error::from)?;
            writeln!(out, "{}", text)?;
        } else {
            let theme = &self.context.theme;
            display::write_state(out, theme, &document.state)?;
            display::write_summary(out, theme, &summary)?;
        }
        Ok(CommandResult::success())
    }
}
