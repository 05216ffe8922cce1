//! Scripted command runner for testing.
//!
//! `MockRunner` implements [`CommandRunner`] with canned answers keyed by
//! the full command line, and records every command it was asked to run.
//!
//! # Example
//!
//! ```
//! use installkit::detection::{CommandRunner, MockRunner};
//!
//! let runner = MockRunner::new().respond("git --version", "git version 2.43.0");
//!
//! let out = runner.run("git", &["--version"]).unwrap();
//! assert!(out.success);
//! assert!(runner.run("curl", &["--version"]).is_err());
//! assert_eq!(runner.calls(), vec!["git --version", "curl --version"]);
//! ```

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::error::{InstallError, Result};
use crate::shell::{display_command, CommandResult};

use super::probe::CommandRunner;

#[derive(Debug, Clone)]
enum Scripted {
    Success(String),
    Failure(Option<i32>),
}

/// Command runner with pre-configured responses.
///
/// Commands without a scripted answer behave like a missing binary.
#[derive(Debug, Default)]
pub struct MockRunner {
    responses: HashMap<String, Scripted>,
    calls: Mutex<Vec<String>>,
}

impl MockRunner {
    /// Create a runner where every command is missing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful command with the given stdout.
    pub fn respond(mut self, command: &str, stdout: &str) -> Self {
        self.responses
            .insert(command.to_string(), Scripted::Success(stdout.to_string()));
        self
    }

    /// Script a command that runs but exits with code 1.
    pub fn fail(mut self, command: &str) -> Self {
        self.responses
            .insert(command.to_string(), Scripted::Failure(Some(1)));
        self
    }

    /// Every command line run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandResult> {
        let command = display_command(program, args);
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(command.clone());
        }

        match self.responses.get(&command) {
            Some(Scripted::Success(stdout)) => Ok(CommandResult::success(
                stdout.clone(),
                String::new(),
                Duration::ZERO,
            )),
            Some(Scripted::Failure(code)) => Ok(CommandResult::failure(
                *code,
                String::new(),
                format!("{}: failed", program),
                Duration::ZERO,
            )),
            None => Err(InstallError::CommandFailed { command, code: None }),
        }
    }
}
