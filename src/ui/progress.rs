//! Step progress display.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::progress::{ProgressSink, ProgressSnapshot, StepStatus};

use super::icons::StatusKind;
use super::theme::InstallTheme;

/// Plain step log line: icon, percent, name and elapsed time.
///
/// ```
/// use installkit::progress::StepStatus;
/// use installkit::ui::format_step_line;
///
/// let line = format_step_line(StepStatus::Completed, 80.0, "Checking admin rights", "3s");
/// assert_eq!(line, "✓ [80.0%] Checking admin rights (3s)");
/// ```
pub fn format_step_line(status: StepStatus, progress: f64, name: &str, elapsed: &str) -> String {
    format!(
        "{} [{:.1}%] {} ({})",
        StatusKind::from(status).icon(),
        progress,
        name,
        elapsed
    )
}

/// Format a duration for display.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 1.0 {
        format!("{}ms", d.as_millis())
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.1}m", secs / 60.0)
    }
}

/// Terminal progress bar driven by tracker snapshots.
pub struct ProgressBarSink {
    bar: ProgressBar,
    theme: InstallTheme,
}

impl ProgressBarSink {
    /// Create a visible bar sized to the step budget.
    pub fn new(total_steps: u32, theme: InstallTheme) -> Self {
        let bar = ProgressBar::new(u64::from(total_steps));
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{bar:30.magenta/dim} {pos}/{len} [{percent:>3}%] {msg}")
                .unwrap()
                .progress_chars("█▓░"),
        );
        Self { bar, theme }
    }

    /// Create a bar that draws nothing (quiet mode, tests).
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            theme: InstallTheme::plain(),
        }
    }

    /// Clone of the inner bar, for finishing after the tracker takes the sink.
    pub fn bar_clone(&self) -> ProgressBar {
        self.bar.clone()
    }
}

impl ProgressSink for ProgressBarSink {
    fn on_progress(&mut self, snapshot: &ProgressSnapshot) -> anyhow::Result<()> {
        self.bar.set_position(u64::from(snapshot.current_step));
        self.bar.set_message(snapshot.step_name.clone());

        if let Some(warning) = &snapshot.details.warning {
            self.bar.println(self.theme.format_warning(warning));
        }
        if snapshot.status == StepStatus::Failed {
            let msg = match &snapshot.details.error {
                Some(error) => format!("{}: {}", snapshot.step_name, error),
                None => snapshot.step_name.clone(),
            };
            self.bar.println(self.theme.format_error(&msg));
        }
        Ok(())
    }
}
