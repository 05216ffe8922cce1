//! Clean command implementation.
//!
//! The `installkit clean` command deletes the progress document and the
//! integration update document.

use std::io::Write;
use std::path::Path;

use crate::cli::args::CleanArgs;
use crate::error::Result;
use crate::progress::persist::remove_if_present;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The clean command implementation.
pub struct CleanCommand {
    context: CommandContext,
    args: CleanArgs,
}

impl CleanCommand {
    /// Create a new clean command.
    pub fn new(context: CommandContext, args: CleanArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &CleanArgs {
        &self.args
    }
}

impl Command for CleanCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let config = self.context.config.tracker_config(&self.context.overrides)?;
        let theme = &self.context.theme;

        let existing: Vec<&Path> = [config.state_path.as_path(), config.update_path.as_path()]
            .into_iter()
            .filter(|p| p.exists())
            .collect();

        if existing.is_empty() {
            writeln!(out, "Nothing to clean")?;
            return Ok(CommandResult::success());
        }

        for path in existing {
            remove_if_present(path);
            if path.exists() {
                let message = format!("Could not remove {}", path.display());
                writeln!(out, "{}", theme.format_error(&message))?;
                return Ok(CommandResult::failure(1));
            }
            writeln!(out, "{}", theme.format_success(&format!("Removed {}", path.display())))?;
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{InstallerConfig, PathOverrides};
    use crate::ui::InstallTheme;
    use tempfile::TempDir;

    fn context(temp: &TempDir) -> CommandContext {
        CommandContext {
            config: InstallerConfig::default(),
            overrides: PathOverrides {
                state_file: Some(temp.path().join("progress.json")),
                update_file: Some(temp.path().join("update.json")),
                total_steps: None,
            },
            theme: InstallTheme::plain(),
        }
    }

    #[test]
    fn removes_both_documents() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("progress.json"), "{}").unwrap();
        std::fs::write(temp.path().join("update.json"), "{}").unwrap();

        let cmd = CleanCommand::new(context(&temp), CleanArgs::default());
        let mut out = Vec::new();
        assert!(cmd.execute(&mut out).unwrap().success);
        assert!(!temp.path().join("progress.json").exists());
        assert!(!temp.path().join("update.json").exists());
        assert_eq!(String::from_utf8(out).unwrap().matches("Removed").count(), 2);
    }

    #[test]
    fn nothing_to_clean() {
        let temp = TempDir::new().unwrap();
        let cmd = CleanCommand::new(context(&temp), CleanArgs::default());
        let mut out = Vec::new();
        assert!(cmd.execute(&mut out).unwrap().success);
        assert!(String::from_utf8(out).unwrap().contains("Nothing to clean"));
    }
}
