//! Configuration file loading.
//!
//! The config file is optional: without `--config`, `installkit.yml` in the
//! working directory is used if present, and built-in defaults otherwise.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::schema::InstallerConfig;
use crate::detection::{CapabilityRegistry, SystemRunner};
use crate::error::{InstallError, Result};
use crate::progress::TrackerConfig;

/// Config file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "installkit.yml";

/// Step budget when neither the config file nor the CLI sets one.
pub const DEFAULT_TOTAL_STEPS: u32 = 5;

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file does not exist.
/// Returns `ConfigParseError` if the file is not a valid config.
pub fn load_config_file(path: &Path) -> Result<InstallerConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            InstallError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            InstallError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into an `InstallerConfig`.
pub fn parse_config(content: &str, source_path: &Path) -> Result<InstallerConfig> {
    if content.trim().is_empty() {
        return Ok(InstallerConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| InstallError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the explicit config file, or the default one from `dir` if present.
pub fn load_config(dir: &Path, config_override: Option<&Path>) -> Result<InstallerConfig> {
    if let Some(path) = config_override {
        return load_config_file(path);
    }

    let default_path = dir.join(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        tracing::debug!("Using config {}", default_path.display());
        load_config_file(&default_path)
    } else {
        Ok(InstallerConfig::default())
    }
}

/// Path overrides from the command line, applied over the config file.
#[derive(Debug, Clone, Default)]
pub struct PathOverrides {
    pub state_file: Option<PathBuf>,
    pub update_file: Option<PathBuf>,
    pub total_steps: Option<u32>,
}

impl InstallerConfig {
    /// Built-in registry with this config's capability overrides applied.
    ///
    /// Fails with `UnknownCapability` for keys that are not built in.
    pub fn registry(&self) -> Result<CapabilityRegistry> {
        let mut registry = CapabilityRegistry::builtin();
        for (key, overrides) in &self.capabilities {
            registry.apply_override(key, overrides)?;
        }
        Ok(registry)
    }

    /// Command runner honoring `detection.timeout_secs`.
    pub fn runner(&self) -> SystemRunner {
        match self.detection.timeout_secs {
            Some(secs) => SystemRunner::with_timeout(Duration::from_secs(secs)),
            None => SystemRunner::new(),
        }
    }

    /// Tracker configuration: CLI overrides, then the file, then defaults.
    ///
    /// Fails with `InvalidConfiguration` for a zero step budget.
    pub fn tracker_config(&self, overrides: &PathOverrides) -> Result<TrackerConfig> {
        let total_steps = overrides
            .total_steps
            .or(self.progress.total_steps)
            .unwrap_or(DEFAULT_TOTAL_STEPS);

        let mut config = TrackerConfig::new(total_steps);
        if let Some(path) = overrides
            .state_file
            .as_ref()
            .or(self.progress.state_path.as_ref())
        {
            config = config.with_state_path(path.clone());
        }
        if let Some(path) = overrides
            .update_file
            .as_ref()
            .or(self.progress.update_path.as_ref())
        {
            config = config.with_update_path(path.clone());
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::CapabilityOverride;
    use tempfile::TempDir;

    #[test]
    fn load_config_file_returns_not_found_error() {
        let temp = TempDir::new().unwrap();
        let err = load_config_file(&temp.path().join("missing.yml")).unwrap_err();
        assert!(matches!(err, InstallError::ConfigNotFound { .. }));
    }

    #[test]
    fn parse_config_returns_parse_error_for_invalid_yaml() {
        let err = parse_config("progress: [", Path::new("installkit.yml")).unwrap_err();
        assert!(matches!(err, InstallError::ConfigParseError { .. }));
    }

    #[test]
    fn load_config_file_handles_empty_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("installkit.yml");
        fs::write(&path, "").unwrap();
        assert_eq!(load_config_file(&path).unwrap(), InstallerConfig::default());
    }

    #[test]
    fn default_file_is_optional() {
        let temp = TempDir::new().unwrap();
        assert_eq!(load_config(temp.path(), None).unwrap(), InstallerConfig::default());
    }

    #[test]
    fn default_file_is_picked_up() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(DEFAULT_CONFIG_FILE),
            "progress:\n  total_steps: 8\n",
        )
        .unwrap();
        let config = load_config(temp.path(), None).unwrap();
        assert_eq!(config.progress.total_steps, Some(8));
    }

    #[test]
    fn explicit_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("custom.yml");
        let err = load_config(temp.path(), Some(&missing)).unwrap_err();
        assert!(matches!(err, InstallError::ConfigNotFound { .. }));
    }

    #[test]
    fn registry_applies_overrides() {
        let mut config = InstallerConfig::default();
        config.capabilities.insert(
            "git".to_string(),
            CapabilityOverride {
                min_version: Some("2.40.0".to_string()),
                ..Default::default()
            },
        );
        let registry = config.registry().unwrap();
        assert_eq!(registry.get("git").unwrap().min_version, "2.40.0");
    }

    #[test]
    fn registry_rejects_unknown_capability() {
        let mut config = InstallerConfig::default();
        config
            .capabilities
            .insert("docker".to_string(), CapabilityOverride::default());
        let err = config.registry().unwrap_err();
        assert!(matches!(err, InstallError::UnknownCapability { .. }));
    }

    #[test]
    fn tracker_config_precedence() {
        let mut config = InstallerConfig::default();
        config.progress.total_steps = Some(8);
        config.progress.state_path = Some(PathBuf::from("/from/file.json"));
        config.progress.update_path = Some(PathBuf::from("/from/update.json"));

        let overrides = PathOverrides {
            state_file: Some(PathBuf::from("/from/cli.json")),
            ..Default::default()
        };
        let tracker = config.tracker_config(&overrides).unwrap();
        assert_eq!(tracker.total_steps, 8);
        assert_eq!(tracker.state_path, PathBuf::from("/from/cli.json"));
        assert_eq!(tracker.update_path, PathBuf::from("/from/update.json"));
    }

    #[test]
    fn tracker_config_defaults() {
        let tracker = InstallerConfig::default()
            .tracker_config(&PathOverrides::default())
            .unwrap();
        assert_eq!(tracker.total_steps, DEFAULT_TOTAL_STEPS);
        assert_eq!(tracker.state_path, crate::progress::config::default_state_path());
    }

    #[test]
    fn tracker_config_rejects_zero_steps() {
        let mut config = InstallerConfig::default();
        config.progress.total_steps = Some(0);
        let err = config.tracker_config(&PathOverrides::default()).unwrap_err();
        assert!(matches!(err, InstallError::InvalidConfiguration { .. }));
    }
}
