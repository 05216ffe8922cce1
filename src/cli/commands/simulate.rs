//! Simulate command implementation.
//!
//! The `installkit simulate` command drives the progress tracker through a
//! sample installation with a terminal progress bar attached.

use std::io::Write;

use crate::cli::args::SimulateArgs;
use crate::error::Result;
use crate::progress::{ProgressTracker, StepDetails, StepStatus};
use crate::ui::ProgressBarSink;

use super::dispatcher::{Command, CommandContext, CommandResult};
use super::display;

/// A sample phase: name plus `(step, details)` pairs.
type Phase = (&'static str, Vec<(&'static str, StepDetails)>);

fn sample_phases() -> Vec<Phase> {
    vec![
        (
            "System Validation",
            vec![
                (
                    "Checking Windows version",
                    StepDetails::new().with("version", "10.0.19041"),
                ),
                ("Checking admin rights", StepDetails::new()),
            ],
        ),
        (
            "WSL2 Installation",
            vec![
                ("Enabling WSL features", StepDetails::new()),
                (
                    "Installing WSL2 kernel",
                    StepDetails::new().with_warning("Reboot may be required"),
                ),
            ],
        ),
        (
            "Claude Code Setup",
            vec![("Installing Claude Code CLI", StepDetails::new())],
        ),
    ]
}

/// The simulate command implementation.
pub struct SimulateCommand {
    context: CommandContext,
    args: SimulateArgs,
}

impl SimulateCommand {
    /// Create a new simulate command.
    pub fn new(context: CommandContext, args: SimulateArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &SimulateArgs {
        &self.args
    }

    fn run(&self, mut tracker: ProgressTracker, out: &mut dyn Write) -> Result<CommandResult> {
        for (phase, steps) in sample_phases() {
            tracker.start_phase(phase, Some(steps.len() as u32));
            for (step, details) in steps {
                tracker.update_progress(step, StepStatus::Completed, details);
            }
        }

        let summary = tracker.generate_summary();
        display::write_state(out, &self.context.theme, tracker.state())?;
        display::write_summary(out, &self.context.theme, &summary)?;

        if !self.args.keep {
            tracker.cleanup();
        }

        if summary.success {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}

impl Command for SimulateCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let mut overrides = self.context.overrides.clone();
        overrides.total_steps = self.args.total_steps;
        let config = self.context.config.tracker_config(&overrides)?;

        let sink = ProgressBarSink::new(config.total_steps, self.context.theme.clone());
        let bar = sink.bar_clone();

        let mut tracker = ProgressTracker::new(config)?;
        tracker.on_progress(sink);
        let result = self.run(tracker, out);
        bar.finish_and_clear();
        result
    }
}
