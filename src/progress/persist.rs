//! Progress document persistence.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{InstallError, Result};

use super::state::ProgressState;
use super::step::StepRecord;

/// On-disk form of a tracker: the state fields plus step history and timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(flatten)]
    pub state: ProgressState,

    #[serde(default)]
    pub step_details: Vec<StepRecord>,

    pub start_time: DateTime<Utc>,

    pub last_update: DateTime<Utc>,

    /// Whole seconds between start and last update.
    #[serde(default)]
    pub elapsed_time: i64,
}

/// Write the document, replacing any previous one.
///
/// Writes to a sibling temp file and renames it over the target, so a
/// reader never sees a partially written document.
pub fn save_document(path: &Path, document: &PersistedState) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    let content = serde_json::to_string_pretty(document).map_err(|e| {
        InstallError::Other(anyhow::anyhow!("Failed to serialize progress: {}", e))
    })?;

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, &content)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}

/// Read the document. `Ok(None)` when the file does not exist.
pub fn load_document(path: &Path) -> Result<Option<PersistedState>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)?;
    let document = serde_json::from_str(&content).map_err(|e| InstallError::StateParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(Some(document))
}

/// Remove a file if present, logging failures.
pub fn remove_if_present(path: &Path) {
    if !path.exists() {
        return;
    }
    match fs::remove_file(path) {
        Ok(()) => tracing::debug!("Removed {}", path.display()),
        Err(e) => tracing::warn!("Could not remove {}: {}", path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn document() -> PersistedState {
        let now = Utc::now();
        PersistedState {
            state: ProgressState::new(5),
            step_details: Vec::new(),
            start_time: now,
            last_update: now,
            elapsed_time: 0,
        }
    }

    #[test]
    fn save_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("progress.json");
        save_document(&path, &document()).unwrap();

        let loaded = load_document(&path).unwrap().unwrap();
        assert_eq!(loaded.state.total_steps, 5);
        assert!(!temp.path().join("progress.json.tmp").exists());
    }

    #[test]
    fn state_fields_are_top_level() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("progress.json");
        save_document(&path, &document()).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["totalSteps"], 5);
        assert_eq!(json["phase"], "initialization");
        assert!(json["stepDetails"].is_array());
        assert!(json["startTime"].is_string());
        assert_eq!(json["elapsedTime"], 0);
    }

    #[test]
    fn creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("progress.json");
        save_document(&path, &document()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn missing_file_is_none() {
        let temp = TempDir::new().unwrap();
        assert!(load_document(&temp.path().join("nope.json")).unwrap().is_none());
    }

    #[test]
    fn garbage_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("progress.json");
        fs::write(&path, "{not json").unwrap();
        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, InstallError::StateParseError { .. }));
    }

    #[test]
    fn remove_if_present_tolerates_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("progress.json");
        remove_if_present(&path);
        fs::write(&path, "{}").unwrap();
        remove_if_present(&path);
        assert!(!path.exists());
    }
}
