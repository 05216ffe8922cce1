//! Error types for installkit operations.
//!
//! This module defines [`InstallError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Configuration errors (bad step totals, unknown capabilities) fail fast
//! - Probe failures are converted into negative detection results by the detector
//! - Persistence failures are returned from the I/O routines and logged by the
//!   tracker, never propagated out of a progress update
//! - Use `anyhow::Error` (via `InstallError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for installkit operations.
#[derive(Debug, Error)]
pub enum InstallError {
    /// Invalid construction or configuration value.
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// Capability key is not present in the detector registry.
    #[error("Unknown capability: {key}")]
    UnknownCapability { key: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Persisted progress document could not be read back.
    #[error("Failed to parse progress state at {path}: {message}")]
    StateParseError { path: PathBuf, message: String },

    /// External command could not be run or exited unsuccessfully.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for installkit operations.
pub type Result<T> = std::result::Result<T, InstallError>;
