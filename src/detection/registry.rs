//! Capability registry.
//!
//! The registry is the fixed, ordered list of host capabilities the
//! detector knows how to probe. It is built once (built-ins plus any
//! config overrides) and handed to the detector, which never mutates it.

use crate::error::{InstallError, Result};
use serde::Deserialize;

/// How a capability is probed on the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeKind {
    /// Virtualization layer: status, version and distribution listing queries.
    Virtualization {
        /// Launcher binary (e.g. `wsl`).
        program: String,
    },

    /// Tool that may live natively or inside the virtualization layer.
    /// The first location with a compatible version wins.
    DualLocation {
        /// Tool binary (e.g. `node`).
        program: String,
    },

    /// Single `<program> --version` query matched against `pattern`.
    Generic {
        /// Tool binary (e.g. `git`).
        program: String,
        /// Regex whose first capture group is the version.
        pattern: String,
    },

    /// The application being installed. Never proposed for reinstall once
    /// any copy is found.
    TargetCli {
        /// CLI binary (e.g. `claude`).
        program: String,
    },
}

/// A registered capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityEntry {
    /// Registry key (e.g. `git`).
    pub key: String,
    /// Display name.
    pub name: String,
    /// Minimum compatible version.
    pub min_version: String,
    /// Informational; detection treats required and optional alike.
    pub required: bool,
    /// Probe strategy.
    pub probe: ProbeKind,
}

impl CapabilityEntry {
    /// Create a capability entry.
    pub fn new(
        key: &str,
        name: &str,
        min_version: &str,
        required: bool,
        probe: ProbeKind,
    ) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            min_version: min_version.to_string(),
            required,
            probe,
        }
    }
}

/// Per-capability override from the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CapabilityOverride {
    /// Replacement minimum version.
    pub min_version: Option<String>,
    /// Replacement required flag.
    pub required: Option<bool>,
    /// Replacement display name.
    pub name: Option<String>,
}

/// Ordered registry of capabilities.
#[derive(Debug, Clone, Default)]
pub struct CapabilityRegistry {
    entries: Vec<CapabilityEntry>,
}

impl CapabilityRegistry {
    /// Create an empty registry.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in capabilities.
    pub fn builtin() -> Self {
        let entries = vec![
            CapabilityEntry::new(
                "wsl2",
                "Windows Subsystem for Linux 2",
                "2.0.0",
                true,
                ProbeKind::Virtualization {
                    program: "wsl".to_string(),
                },
            ),
            CapabilityEntry::new(
                "nodejs",
                "Node.js",
                "18.0.0",
                false,
                ProbeKind::DualLocation {
                    program: "node".to_string(),
                },
            ),
            CapabilityEntry::new(
                "git",
                "Git",
                "2.30.0",
                false,
                ProbeKind::Generic {
                    program: "git".to_string(),
                    pattern: r"git version ([\d.]+)".to_string(),
                },
            ),
            CapabilityEntry::new(
                "curl",
                "Curl",
                "7.70.0",
                false,
                ProbeKind::Generic {
                    program: "curl".to_string(),
                    pattern: r"curl ([\d.]+)".to_string(),
                },
            ),
            CapabilityEntry::new(
                "claude",
                "Claude Code CLI",
                "0.0.1",
                false,
                ProbeKind::TargetCli {
                    program: "claude".to_string(),
                },
            ),
        ];
        Self { entries }
    }

    /// Register a capability, replacing any entry with the same key in place.
    pub fn register(&mut self, entry: CapabilityEntry) {
        match self.entries.iter_mut().find(|e| e.key == entry.key) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Apply a config override to an existing capability.
    pub fn apply_override(&mut self, key: &str, overrides: &CapabilityOverride) -> Result<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.key == key)
            .ok_or_else(|| InstallError::UnknownCapability {
                key: key.to_string(),
            })?;

        if let Some(min) = &overrides.min_version {
            if min.trim().is_empty() {
                return Err(InstallError::InvalidConfiguration {
                    message: format!("min_version for '{}' must not be empty", key),
                });
            }
            entry.min_version = min.clone();
        }
        if let Some(required) = overrides.required {
            entry.required = required;
        }
        if let Some(name) = &overrides.name {
            entry.name = name.clone();
        }
        Ok(())
    }

    /// Look up a capability by key.
    pub fn get(&self, key: &str) -> Option<&CapabilityEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Whether a capability is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// All entries in registration order.
    pub fn entries(&self) -> &[CapabilityEntry] {
        &self.entries
    }

    /// All keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// Number of registered capabilities.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no capabilities.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
