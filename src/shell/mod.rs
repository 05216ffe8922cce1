//! Host command execution.

pub mod command;

pub use command::{decode_output, display_command, execute, CommandOptions, CommandResult};
