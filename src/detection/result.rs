//! Per-capability detection results.

use serde::{Deserialize, Serialize};

use super::distributions::Distribution;

/// Where a tool was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchLocation {
    /// The host environment.
    #[serde(rename = "Windows")]
    Native,
    /// Inside the virtualization layer.
    #[serde(rename = "WSL")]
    Virtualized,
}

impl SearchLocation {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Native => "Windows",
            Self::Virtualized => "WSL",
        }
    }
}

impl std::fmt::Display for SearchLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of probing one capability.
///
/// Produced fresh on every detection run and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    /// Whether any copy was found.
    pub installed: bool,

    /// Detected version.
    pub version: Option<String>,

    /// Whether the version meets the registry minimum.
    pub compatible: bool,

    /// Whether the installer should install this capability.
    pub should_install: bool,

    /// Where the reported version was found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SearchLocation>,

    /// Distribution listing (virtualization layer only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distributions: Option<Vec<Distribution>>,

    /// Capability-specific extra data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,

    /// Probe error, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DetectionResult {
    /// A capability that is not present and must be installed.
    pub fn missing() -> Self {
        Self {
            installed: false,
            version: None,
            compatible: false,
            should_install: true,
            location: None,
            distributions: None,
            details: None,
            error: None,
        }
    }

    /// A probe that failed outright.
    pub fn failed(message: &str) -> Self {
        Self::missing().with_error(message)
    }

    /// A capability found at `version`. Installation is proposed unless compatible.
    pub fn found(version: &str, compatible: bool) -> Self {
        Self {
            installed: true,
            version: Some(version.to_string()),
            compatible,
            should_install: !compatible,
            ..Self::missing()
        }
    }

    /// Set the location.
    pub fn with_location(mut self, location: SearchLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Set the distribution listing.
    pub fn with_distributions(mut self, distributions: Vec<Distribution>) -> Self {
        self.distributions = Some(distributions);
        self
    }

    /// Set capability-specific details.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Set the error message.
    pub fn with_error(mut self, message: &str) -> Self {
        self.error = Some(message.to_string());
        self
    }

    /// Override the install decision.
    pub fn with_should_install(mut self, should_install: bool) -> Self {
        self.should_install = should_install;
        self
    }
}
