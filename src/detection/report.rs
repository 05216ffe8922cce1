//! Aggregated detection results and the human-readable summary.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt::Write;

use crate::ui::StatusKind;

use super::registry::CapabilityRegistry;
use super::result::DetectionResult;

/// Message returned when a summary is requested before any detection run.
pub const NO_RESULTS_MESSAGE: &str =
    "No dependency detection results available. Run detect_all() first.";

/// Results of one detection run, in registry order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionReport {
    entries: Vec<(String, DetectionResult)>,
}

impl DetectionReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result.
    pub fn insert(&mut self, key: &str, result: DetectionResult) {
        self.entries.push((key.to_string(), result));
    }

    /// Result for one capability.
    pub fn get(&self, key: &str) -> Option<&DetectionResult> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, result)| result)
    }

    /// All results in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DetectionResult)> {
        self.entries.iter().map(|(k, r)| (k.as_str(), r))
    }

    /// Keys of capabilities that should be installed.
    pub fn to_install(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, r)| r.should_install)
            .map(|(k, _)| k)
            .collect()
    }

    /// Number of capabilities that should be installed.
    pub fn install_count(&self) -> usize {
        self.entries.iter().filter(|(_, r)| r.should_install).count()
    }

    /// Number of capabilities in the report.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the report is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Coarse install-time estimate in minutes, as a `(low, high)` range.
    ///
    /// Two minutes per component to install, never below two, plus three
    /// minutes of slack on the upper bound.
    pub fn estimated_minutes(&self) -> (usize, usize) {
        let low = (self.install_count() * 2).max(2);
        (low, low + 3)
    }

    /// Render the plain-text summary.
    pub fn render_summary(&self, registry: &CapabilityRegistry) -> String {
        if self.is_empty() {
            return NO_RESULTS_MESSAGE.to_string();
        }

        let mut out = String::new();
        let _ = writeln!(out, "Dependency Detection Summary");
        let _ = writeln!(out, "================================");
        let _ = writeln!(out);

        for (key, result) in self.iter() {
            let name = registry.get(key).map(|e| e.name.as_str()).unwrap_or(key);
            let status = match (result.installed, result.compatible) {
                (true, true) => StatusKind::Success,
                (true, false) => StatusKind::Warning,
                (false, _) => StatusKind::Failed,
            };
            let _ = writeln!(out, "{} {}", status.icon(), name);

            if result.installed {
                let _ = writeln!(
                    out,
                    "   Version: {}",
                    result.version.as_deref().unwrap_or("Unknown")
                );
                if let Some(location) = result.location {
                    let _ = writeln!(out, "   Location: {}", location);
                }
                let _ = writeln!(
                    out,
                    "   Status: {}",
                    if result.compatible {
                        "Compatible"
                    } else {
                        "Needs upgrade"
                    }
                );
            } else {
                let _ = writeln!(out, "   Status: Not installed");
            }

            let _ = writeln!(
                out,
                "   Action: {}",
                if result.should_install {
                    "Will install"
                } else {
                    "Will use existing"
                }
            );

            if let Some(error) = &result.error {
                let _ = writeln!(out, "   Error: {}", error);
            }
            let _ = writeln!(out);
        }

        let (low, high) = self.estimated_minutes();
        let _ = writeln!(out, "Estimated installation time: {}-{} minutes", low, high);
        let _ = writeln!(
            out,
            "Components to install: {}/{}",
            self.install_count(),
            self.len()
        );
        out
    }
}

impl Serialize for DetectionReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, result) in &self.entries {
            map.serialize_entry(key, result)?;
        }
        map.end()
    }
}
