//! Shared rendering for progress output.

use std::io::Write;

use crate::error::Result;
use crate::progress::{InstallSummary, ProgressState};
use crate::ui::{InstallTheme, StatusKind};

/// Write the progress state block.
pub fn write_state(out: &mut dyn Write, theme: &InstallTheme, state: &ProgressState) -> Result<()> {
    writeln!(out, "{}", theme.format_header("Installation Progress"))?;
    writeln!(out, "{}", theme.format_key_value("Phase", &state.phase))?;
    writeln!(
        out,
        "{}",
        theme.format_key_value(
            "Progress",
            &format!(
                "{:.1}% ({}/{} steps)",
                state.overall_progress, state.current_step, state.total_steps
            )
        )
    )?;
    writeln!(
        out,
        "{}",
        theme.format_key_value("Current operation", &state.current_operation)
    )?;
    if let Some(remaining) = state.estimated_time_remaining {
        writeln!(
            out,
            "{}",
            theme.format_key_value("Estimated time remaining", &format!("{}s", remaining))
        )?;
    }
    Ok(())
}

/// Write the end-of-run summary.
pub fn write_summary(
    out: &mut dyn Write,
    theme: &InstallTheme,
    summary: &InstallSummary,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", theme.format_header("Installation Summary"))?;
    let outcome = if summary.success {
        StatusKind::Success.format(theme, "Success")
    } else {
        StatusKind::Failed.format(theme, "Failed")
    };
    writeln!(out, "{}", outcome)?;
    writeln!(out, "{}", theme.format_key_value("Total time", &summary.total_time))?;
    writeln!(
        out,
        "{}",
        theme.format_key_value(
            "Steps completed",
            &format!("{}/{}", summary.completed_steps, summary.total_steps)
        )
    )?;
    if summary.failed_steps > 0 {
        writeln!(
            out,
            "{}",
            theme.format_key_value("Steps failed", &summary.failed_steps.to_string())
        )?;
    }
    if summary.skipped_steps > 0 {
        writeln!(
            out,
            "{}",
            theme.format_key_value("Steps skipped", &summary.skipped_steps.to_string())
        )?;
    }
    writeln!(
        out,
        "{}",
        theme.format_key_value("Warnings", &summary.warnings.len().to_string())
    )?;

    for warning in &summary.warnings {
        writeln!(
            out,
            "   {}",
            theme.format_warning(&format!("{}: {}", warning.step, warning.warning))
        )?;
    }
    for error in &summary.errors {
        writeln!(
            out,
            "   {}",
            theme.format_error(&format!("{}: {}", error.step, error.error))
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{ErrorEntry, WarningEntry};
    use chrono::Utc;

    #[test]
    fn state_block_shows_progress() {
        let mut state = ProgressState::new(5);
        state.current_step = 4;
        state.overall_progress = 80.0;
        let mut out = Vec::new();
        write_state(&mut out, &InstallTheme::plain(), &state).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Progress: 80.0% (4/5 steps)"));
        assert!(text.contains("Phase: initialization"));
        assert!(!text.contains("Estimated time remaining"));
    }

    #[test]
    fn summary_lists_warnings_and_errors() {
        let summary = InstallSummary {
            total_steps: 3,
            completed_steps: 1,
            failed_steps: 1,
            skipped_steps: 0,
            total_time: "4s".to_string(),
            elapsed_seconds: 4,
            success: false,
            errors: vec![ErrorEntry {
                step: "Install kernel".to_string(),
                error: "exit code 5".to_string(),
                timestamp: Utc::now(),
            }],
            warnings: vec![WarningEntry {
                step: "Enable WSL".to_string(),
                warning: "Reboot may be required".to_string(),
                timestamp: Utc::now(),
            }],
            step_details: Vec::new(),
        };
        let mut out = Vec::new();
        write_summary(&mut out, &InstallTheme::plain(), &summary).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("✗ Failed"));
        assert!(text.contains("Steps completed: 1/3"));
        assert!(text.contains("Steps failed: 1"));
        assert!(text.contains("⚠ Enable WSL: Reboot may be required"));
        assert!(text.contains("✗ Install kernel: exit code 5"));
    }
}
