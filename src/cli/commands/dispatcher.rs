//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandContext`] for the settings every command shares
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::{load_config, InstallerConfig, PathOverrides};
use crate::error::Result;
use crate::ui::InstallTheme;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command, writing user-facing output to `out`.
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Loaded config file (or defaults).
    pub config: InstallerConfig,
    /// Path flags from the command line.
    pub overrides: PathOverrides,
    /// Output styling.
    pub theme: InstallTheme,
}

impl CommandContext {
    /// Load the config for `dir` and capture the global flags.
    pub fn from_cli(cli: &Cli, dir: &Path) -> Result<Self> {
        let config = load_config(dir, cli.config.as_deref())?;
        Ok(Self {
            config,
            overrides: PathOverrides {
                state_file: cli.state_file.clone(),
                update_file: cli.update_file.clone(),
                total_steps: None,
            },
            theme: InstallTheme::detect(cli.no_color),
        })
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    working_dir: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher resolving the default config from `working_dir`.
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }

    /// Get the working directory.
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, out: &mut dyn Write) -> Result<CommandResult> {
        let context = CommandContext::from_cli(cli, &self.working_dir)?;
        match &cli.command {
            Commands::Detect(args) => {
                super::detect::DetectCommand::new(context, args.clone()).execute(out)
            }
            Commands::Status(args) => {
                super::status::StatusCommand::new(context, args.clone()).execute(out)
            }
            Commands::Clean(args) => {
                super::clean::CleanCommand::new(context, args.clone()).execute(out)
            }
            Commands::Simulate(args) => {
                super::simulate::SimulateCommand::new(context, args.clone()).execute(out)
            }
        }
    }
}
