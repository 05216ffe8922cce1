//! Detect command implementation.
//!
//! The `installkit detect` command probes the host for every registered
//! capability and prints the summary or the raw report.

use std::io::Write;
use std::time::Instant;

use crate::cli::args::DetectArgs;
use crate::detection::{CommandRunner, DependencyDetector};
use crate::error::Result;
use crate::ui::format_duration;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The detect command implementation.
pub struct DetectCommand {
    context: CommandContext,
    args: DetectArgs,
}

impl DetectCommand {
    /// Create a new detect command.
    pub fn new(context: CommandContext, args: DetectArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &DetectArgs {
        &self.args
    }

    /// Run detection with an explicit runner.
    pub fn execute_with(
        &self,
        runner: impl CommandRunner + 'static,
        out: &mut dyn Write,
    ) -> Result<CommandResult> {
        let registry = self.context.config.registry()?;
        let mut detector = DependencyDetector::with_runner(registry, runner);

        let started = Instant::now();
        let concurrent = self.args.concurrent || self.context.config.detection.concurrent;
        let report = if concurrent {
            detector.detect_all_concurrent()
        } else {
            detector.detect_all()
        };
        tracing::debug!("Detection took {}", format_duration(started.elapsed()));

        if self.args.json {
            let json = serde_json::to_string_pretty(report).map_err(anyhow::Error::from)?;
            writeln!(out, "{}", json)?;
        } else {
            write!(out, "{}", detector.generate_summary())?;
        }
        Ok(CommandResult::success())
    }
}

impl Command for DetectCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        self.execute_with(self.context.config.runner(), out)
    }
}
