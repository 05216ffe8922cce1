//! Virtualization-layer distribution listing.
//!
//! Parses the tabular output of `wsl --list --verbose`:
//!
//! ```text
//!   NAME            STATE           VERSION
//! * Alpine          Running         2
//!   Ubuntu-22.04    Stopped         2
//! ```
//!
//! Header and separator rows are skipped, a leading `*` marks the default
//! distribution, and rows with fewer than three fields are dropped.

use serde::{Deserialize, Serialize};

/// One installed distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    /// Distribution name.
    pub name: String,
    /// Whether this row carried the default marker.
    pub default: bool,
    /// Run state (e.g. `Running`, `Stopped`).
    pub state: String,
    /// Layer version column (e.g. `2`).
    pub version: String,
}

/// Parse a distribution listing. Malformed rows are ignored.
pub fn parse_distributions(output: &str) -> Vec<Distribution> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !line.contains("NAME") && !line.contains("---"))
        .filter_map(parse_row)
        .collect()
}

fn parse_row(line: &str) -> Option<Distribution> {
    let is_default = line.starts_with('*');
    let working = line.trim_start_matches('*').trim_start();
    let parts: Vec<&str> = working.split_whitespace().collect();
    if parts.len() < 3 {
        return None;
    }
    Some(Distribution {
        name: parts[0].to_string(),
        default: is_default,
        state: parts[1].to_string(),
        version: parts[2].to_string(),
    })
}

/// Whether any distribution name contains `needle` (case-insensitive).
pub fn has_distribution(distributions: &[Distribution], needle: &str) -> bool {
    let needle = needle.to_lowercase();
    distributions
        .iter()
        .any(|d| d.name.to_lowercase().contains(&needle))
}

/// Layer version of the default distribution, if one is marked.
pub fn default_version(distributions: &[Distribution]) -> Option<&str> {
    distributions
        .iter()
        .find(|d| d.default)
        .map(|d| d.version.as_str())
}
