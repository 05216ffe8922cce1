//! Per-capability probes.
//!
//! Each probe issues one or more version queries through a [`CommandRunner`]
//! and turns the answers into a [`DetectionResult`]. A query that cannot be
//! spawned, exits non-zero, or prints nothing version-like counts as "not
//! found" at that location; only genuinely broken probe definitions (such as
//! an invalid version pattern) surface as errors.

use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;
use std::time::Duration;

use crate::error::{InstallError, Result};
use crate::shell::{display_command, execute, CommandOptions, CommandResult};

use super::distributions::{default_version, has_distribution, parse_distributions};
use super::registry::{CapabilityEntry, ProbeKind};
use super::result::{DetectionResult, SearchLocation};
use super::version::{any_version_pattern, extract_version, meets_minimum};

/// Launcher used to run a tool inside the virtualization layer.
pub const VIRTUALIZATION_LAUNCHER: &str = "wsl";

/// Flag passed to every tool to ask for its version.
const VERSION_FLAG: &str = "--version";

static LAYER_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"WSL version: ([\d.]+)").unwrap());

/// Runs host commands on behalf of probes.
///
/// `Send + Sync` so probes can run on scoped threads.
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` and capture its output.
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandResult>;
}

/// Runs commands on the real host.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    options: CommandOptions,
}

impl SystemRunner {
    /// Create a runner with no per-command timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill any query that runs longer than `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            options: CommandOptions {
                timeout: Some(timeout),
            },
        }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandResult> {
        execute(program, args, &self.options)
    }
}

/// Run a query and return its stdout if it succeeded.
fn query(runner: &dyn CommandRunner, program: &str, args: &[&str]) -> Option<String> {
    let cmdline = display_command(program, args);
    match runner.run(program, args) {
        Ok(result) if result.success => {
            tracing::debug!("{} -> {}", cmdline, result.stdout.trim());
            Some(result.stdout)
        }
        Ok(result) => {
            tracing::debug!("{} exited with {:?}", cmdline, result.exit_code);
            None
        }
        Err(e) => {
            tracing::debug!("{} failed: {}", cmdline, e);
            None
        }
    }
}

/// Query a tool's version at one location.
fn version_at(
    runner: &dyn CommandRunner,
    program: &str,
    location: SearchLocation,
    pattern: &Regex,
) -> Option<String> {
    let output = match location {
        SearchLocation::Native => query(runner, program, &[VERSION_FLAG])?,
        SearchLocation::Virtualized => query(
            runner,
            VIRTUALIZATION_LAUNCHER,
            &["--", program, VERSION_FLAG],
        )?,
    };
    extract_version(output.trim(), pattern)
}

/// Probe one capability.
pub fn probe(runner: &dyn CommandRunner, entry: &CapabilityEntry) -> Result<DetectionResult> {
    match &entry.probe {
        ProbeKind::Virtualization { program } => Ok(probe_virtualization(runner, program, entry)),
        ProbeKind::DualLocation { program } => Ok(probe_dual_location(runner, program, entry)),
        ProbeKind::Generic { program, pattern } => {
            let re = Regex::new(pattern).map_err(|e| InstallError::InvalidConfiguration {
                message: format!("Invalid version pattern for '{}': {}", entry.key, e),
            })?;
            Ok(probe_generic(runner, program, &re, entry))
        }
        ProbeKind::TargetCli { program } => Ok(probe_target_cli(runner, program, entry)),
    }
}

/// `<program> --version` matched against a fixed pattern.
fn probe_generic(
    runner: &dyn CommandRunner,
    program: &str,
    pattern: &Regex,
    entry: &CapabilityEntry,
) -> DetectionResult {
    match version_at(runner, program, SearchLocation::Native, pattern) {
        Some(version) => {
            let compatible = meets_minimum(&version, &entry.min_version);
            DetectionResult::found(&version, compatible)
        }
        None => DetectionResult::missing(),
    }
}

/// Status, version and distribution listing of the virtualization layer.
///
/// All three queries must succeed for the layer to count as installed.
fn probe_virtualization(
    runner: &dyn CommandRunner,
    program: &str,
    entry: &CapabilityEntry,
) -> DetectionResult {
    let outputs = query(runner, program, &["--status"]).and_then(|_| {
        let version_out = query(runner, program, &[VERSION_FLAG])?;
        let listing = query(runner, program, &["--list", "--verbose"])?;
        Some((version_out, listing))
    });
    let Some((version_out, listing)) = outputs else {
        return DetectionResult::failed("WSL not found or not accessible")
            .with_distributions(Vec::new());
    };

    let version = extract_version(&version_out, &LAYER_VERSION);
    let distributions = parse_distributions(&listing);

    let compatible = version
        .as_deref()
        .is_some_and(|v| meets_minimum(v, &entry.min_version));

    let details = json!({
        "hasAlpine": has_distribution(&distributions, "alpine"),
        "defaultVersion": default_version(&distributions).unwrap_or("Unknown"),
    });

    DetectionResult {
        installed: true,
        version,
        compatible,
        should_install: !compatible,
        ..DetectionResult::missing()
    }
    .with_distributions(distributions)
    .with_details(details)
}

/// Tool checked natively and inside the virtualization layer.
///
/// The first location with a compatible version wins. When neither is
/// compatible, `installed` still reflects any version found but `version`
/// and `location` stay empty; the per-location details carry what was seen.
fn probe_dual_location(
    runner: &dyn CommandRunner,
    program: &str,
    entry: &CapabilityEntry,
) -> DetectionResult {
    let locations = [SearchLocation::Native, SearchLocation::Virtualized];
    let found: Vec<(SearchLocation, Option<String>)> = locations
        .iter()
        .map(|&loc| (loc, version_at(runner, program, loc, any_version_pattern())))
        .collect();

    let details = json!({
        "native": location_details(&found[0].1),
        "virtualized": location_details(&found[1].1),
    });

    let compatible_hit = found.iter().find_map(|(loc, version)| {
        version
            .as_deref()
            .filter(|v| meets_minimum(v, &entry.min_version))
            .map(|v| (*loc, v))
    });

    if let Some((location, version)) = compatible_hit {
        return DetectionResult::found(version, true)
            .with_location(location)
            .with_details(details);
    }

    let installed = found.iter().any(|(_, version)| version.is_some());
    DetectionResult {
        installed,
        ..DetectionResult::missing()
    }
    .with_details(details)
}

fn location_details(version: &Option<String>) -> serde_json::Value {
    json!({
        "installed": version.is_some(),
        "version": version,
    })
}

/// The application being installed.
///
/// Checked natively first, then inside the virtualization layer. Any copy
/// found at any version means "use existing".
fn probe_target_cli(
    runner: &dyn CommandRunner,
    program: &str,
    entry: &CapabilityEntry,
) -> DetectionResult {
    let hit = [SearchLocation::Native, SearchLocation::Virtualized]
        .into_iter()
        .find_map(|loc| {
            version_at(runner, program, loc, any_version_pattern()).map(|v| (loc, v))
        });

    match hit {
        Some((location, version)) => {
            let compatible = meets_minimum(&version, &entry.min_version);
            DetectionResult::found(&version, compatible)
                .with_should_install(false)
                .with_location(location)
        }
        None => DetectionResult::missing(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::mock::MockRunner;
    use crate::detection::registry::CapabilityRegistry;

    fn entry(key: &str) -> CapabilityEntry {
        CapabilityRegistry::builtin().get(key).unwrap().clone()
    }

    #[test]
    fn virtualization_installed_and_compatible() {
        let runner = MockRunner::new()
            .respond("wsl --status", "Default Distribution: Alpine")
            .respond("wsl --version", "WSL version: 2.0.9.0\nKernel version: 5.15.133.1")
            .respond("wsl --list --verbose", "  NAME   STATE   VERSION\n* Alpine Running 2\n");

        let result = probe(&runner, &entry("wsl2")).unwrap();
        assert!(result.installed);
        assert_eq!(result.version.as_deref(), Some("2.0.9.0"));
        assert!(result.compatible);
        assert!(!result.should_install);
        assert_eq!(result.distributions.as_ref().unwrap().len(), 1);
        let details = result.details.unwrap();
        assert_eq!(details["hasAlpine"], true);
        assert_eq!(details["defaultVersion"], "2");
    }

    #[test]
    fn virtualization_missing() {
        let runner = MockRunner::new();
        let result = probe(&runner, &entry("wsl2")).unwrap();
        assert!(!result.installed);
        assert!(result.version.is_none());
        assert!(!result.compatible);
        assert!(result.should_install);
        assert_eq!(result.error.as_deref(), Some("WSL not found or not accessible"));
        assert_eq!(result.distributions, Some(Vec::new()));
    }

    #[test]
    fn virtualization_old_version_needs_install() {
        let runner = MockRunner::new()
            .respond("wsl --status", "ok")
            .respond("wsl --version", "WSL version: 1.2.5.0")
            .respond("wsl --list --verbose", "  NAME   STATE   VERSION\n  Ubuntu Stopped 2\n");

        let result = probe(&runner, &entry("wsl2")).unwrap();
        assert!(result.installed);
        assert!(!result.compatible);
        assert!(result.should_install);
        let details = result.details.unwrap();
        assert_eq!(details["defaultVersion"], "Unknown");
        assert_eq!(details["hasAlpine"], false);
    }

    #[test]
    fn virtualization_unparseable_version_is_incompatible() {
        let runner = MockRunner::new()
            .respond("wsl --status", "ok")
            .respond("wsl --version", "unexpected")
            .respond("wsl --list --verbose", "");
        let result = probe(&runner, &entry("wsl2")).unwrap();
        assert!(result.installed);
        assert!(result.version.is_none());
        assert!(result.should_install);
    }

    #[test]
    fn virtualization_failed_version_query_is_not_installed() {
        let runner = MockRunner::new()
            .respond("wsl --status", "ok")
            .fail("wsl --version")
            .respond("wsl --list --verbose", "");
        let result = probe(&runner, &entry("wsl2")).unwrap();
        assert!(!result.installed);
        assert!(result.should_install);
        assert_eq!(result.error.as_deref(), Some("WSL not found or not accessible"));
        assert_eq!(result.distributions, Some(Vec::new()));
        assert!(result.details.is_none());
    }

    #[test]
    fn virtualization_failed_listing_is_not_installed() {
        let runner = MockRunner::new()
            .respond("wsl --status", "ok")
            .respond("wsl --version", "WSL version: 2.0.9.0")
            .fail("wsl --list --verbose");
        let result = probe(&runner, &entry("wsl2")).unwrap();
        assert!(!result.installed);
        assert!(result.version.is_none());
        assert!(!result.compatible);
        assert!(result.should_install);
    }

    #[test]
    fn dual_location_prefers_native() {
        let runner = MockRunner::new()
            .respond("node --version", "v20.11.0\n")
            .respond("wsl -- node --version", "v18.19.0\n");

        let result = probe(&runner, &entry("nodejs")).unwrap();
        assert_eq!(result.version.as_deref(), Some("20.11.0"));
        assert_eq!(result.location, Some(SearchLocation::Native));
        assert!(result.compatible);
        assert!(!result.should_install);
    }

    #[test]
    fn dual_location_falls_back_to_virtualized() {
        let runner = MockRunner::new().respond("wsl -- node --version", "v18.19.0");

        let result = probe(&runner, &entry("nodejs")).unwrap();
        assert!(result.installed);
        assert_eq!(result.version.as_deref(), Some("18.19.0"));
        assert_eq!(result.location, Some(SearchLocation::Virtualized));
        assert!(!result.should_install);
        let details = result.details.unwrap();
        assert_eq!(details["native"]["installed"], false);
        assert_eq!(details["virtualized"]["version"], "18.19.0");
    }

    #[test]
    fn dual_location_compatible_virtualized_beats_old_native() {
        let runner = MockRunner::new()
            .respond("node --version", "v16.20.2")
            .respond("wsl -- node --version", "v20.11.0");

        let result = probe(&runner, &entry("nodejs")).unwrap();
        assert_eq!(result.location, Some(SearchLocation::Virtualized));
        assert_eq!(result.version.as_deref(), Some("20.11.0"));
        assert!(result.compatible);
    }

    #[test]
    fn dual_location_installed_but_incompatible() {
        let runner = MockRunner::new().respond("node --version", "v16.20.2");

        let result = probe(&runner, &entry("nodejs")).unwrap();
        assert!(result.installed);
        assert!(!result.compatible);
        assert!(result.should_install);
        assert!(result.version.is_none());
        assert!(result.location.is_none());
        let details = result.details.unwrap();
        assert_eq!(details["native"]["installed"], true);
        assert_eq!(details["native"]["version"], "16.20.2");
        assert_eq!(details["virtualized"]["installed"], false);
    }

    #[test]
    fn dual_location_missing_everywhere() {
        let result = probe(&MockRunner::new(), &entry("nodejs")).unwrap();
        assert!(!result.installed);
        assert!(result.should_install);
        assert!(result.location.is_none());
    }

    #[test]
    fn queries_log_at_debug() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::sink)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let runner = MockRunner::new()
                .respond("git --version", "git version 2.43.0")
                .fail("curl --version");
            assert!(query(&runner, "git", &["--version"]).is_some());
            assert!(query(&runner, "curl", &["--version"]).is_none());
            assert!(query(&runner, "node", &["--version"]).is_none());
        });
    }

    #[test]
    fn generic_tool_found() {
        let runner = MockRunner::new().respond("git --version", "git version 2.43.0");
        let result = probe(&runner, &entry("git")).unwrap();
        assert!(result.installed);
        assert_eq!(result.version.as_deref(), Some("2.43.0"));
        assert!(result.compatible);
        assert!(!result.should_install);
    }

    #[test]
    fn generic_tool_unparseable_output_is_missing() {
        let runner = MockRunner::new().respond("curl --version", "something unexpected");
        let result = probe(&runner, &entry("curl")).unwrap();
        assert!(!result.installed);
        assert!(result.should_install);
    }

    #[test]
    fn generic_tool_invalid_pattern_errors() {
        let mut bad = entry("git");
        bad.probe = ProbeKind::Generic {
            program: "git".to_string(),
            pattern: "git version ([".to_string(),
        };
        let err = probe(&MockRunner::new(), &bad).unwrap_err();
        assert!(matches!(err, InstallError::InvalidConfiguration { .. }));
    }

    #[test]
    fn target_cli_never_reinstalled() {
        let mut old = entry("claude");
        old.min_version = "5.0.0".to_string();
        let runner = MockRunner::new().respond("claude --version", "1.0.17 (Claude Code)");

        let result = probe(&runner, &old).unwrap();
        assert!(result.installed);
        assert!(!result.compatible);
        assert!(!result.should_install);
        assert_eq!(result.location, Some(SearchLocation::Native));
    }

    #[test]
    fn target_cli_found_in_virtualized_layer() {
        let runner = MockRunner::new().respond("wsl -- claude --version", "1.0.17");
        let result = probe(&runner, &entry("claude")).unwrap();
        assert_eq!(result.location, Some(SearchLocation::Virtualized));
        assert!(!result.should_install);
    }

    #[test]
    fn target_cli_missing() {
        let result = probe(&MockRunner::new(), &entry("claude")).unwrap();
        assert!(!result.installed);
        assert!(result.should_install);
        assert!(result.location.is_none());
    }
}
