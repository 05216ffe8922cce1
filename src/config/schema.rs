//! Configuration schema for `installkit.yml`.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::detection::CapabilityOverride;

/// Root configuration structure for installkit.yml
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstallerConfig {
    /// Progress tracker settings
    pub progress: ProgressSettings,

    /// Dependency detection settings
    pub detection: DetectionSettings,

    /// Overrides for built-in capabilities, keyed by capability key
    pub capabilities: BTreeMap<String, CapabilityOverride>,
}

/// Progress tracker settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProgressSettings {
    /// Step budget for a tracked run
    pub total_steps: Option<u32>,

    /// Progress document path
    pub state_path: Option<PathBuf>,

    /// Integration update document path
    pub update_path: Option<PathBuf>,
}

/// Dependency detection settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectionSettings {
    /// Probe capabilities in parallel
    pub concurrent: bool,

    /// Per-command timeout in seconds
    pub timeout_secs: Option<u64>,
}
