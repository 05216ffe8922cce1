//! Tracker configuration.

use std::path::{Path, PathBuf};

use crate::error::{InstallError, Result};

/// Default file name of the persisted progress document.
pub const DEFAULT_STATE_FILE: &str = "installkit-progress.json";

/// Default file name of the integration update document.
pub const DEFAULT_UPDATE_FILE: &str = "installkit-update.json";

/// Construction-time configuration for a [`ProgressTracker`](super::ProgressTracker).
///
/// Both document paths default into the system temporary directory and can
/// be overridden individually.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Step budget. Must be at least 1.
    pub total_steps: u32,
    /// Where the full progress document is written.
    pub state_path: PathBuf,
    /// Where the integration update document is written.
    pub update_path: PathBuf,
}

impl TrackerConfig {
    /// Configuration with default document paths.
    pub fn new(total_steps: u32) -> Self {
        Self {
            total_steps,
            state_path: default_state_path(),
            update_path: default_update_path(),
        }
    }

    /// Override the progress document path.
    pub fn with_state_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_path = path.into();
        self
    }

    /// Override the integration update document path.
    pub fn with_update_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.update_path = path.into();
        self
    }

    /// Put both documents in `dir` under their default names.
    pub fn in_dir(self, dir: &Path) -> Self {
        self.with_state_path(dir.join(DEFAULT_STATE_FILE))
            .with_update_path(dir.join(DEFAULT_UPDATE_FILE))
    }

    /// Reject a zero step budget.
    pub fn validate(&self) -> Result<()> {
        if self.total_steps == 0 {
            return Err(InstallError::InvalidConfiguration {
                message: "total_steps must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Default progress document path.
pub fn default_state_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_STATE_FILE)
}

/// Default integration update document path.
pub fn default_update_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_UPDATE_FILE)
}
