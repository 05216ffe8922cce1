//! Dependency detection public API tests.

use std::cmp::Ordering;

use installkit::detection::{
    compare_versions, parse_distributions, CapabilityRegistry, DependencyDetector, MockRunner,
    SearchLocation, NO_RESULTS_MESSAGE,
};
use installkit::InstallError;

fn windows_host() -> MockRunner {
    MockRunner::new()
        .respond("wsl --status", "Default Version: 2")
        .respond("wsl --version", "WSL version: 2.0.9.0\nKernel version: 5.15.133.1-1")
        .respond(
            "wsl --list --verbose",
            "  NAME      STATE           VERSION\n* Alpine    Running         2\n  Ubuntu    Stopped         2\n",
        )
        .respond("wsl -- node --version", "v20.11.0")
        .respond("git --version", "git version 2.20.1.windows.1")
        .respond("curl --version", "curl 8.4.0 (Windows) libcurl/8.4.0")
}

#[test]
fn version_comparison() {
    assert_eq!(compare_versions("2.0.9.0", "2.0.0"), Ordering::Greater);
    assert_eq!(compare_versions("1.2", "1.10"), Ordering::Less);
    assert_eq!(compare_versions("18.0", "18.0.0"), Ordering::Equal);
}

#[test]
fn distribution_listing() {
    let dists = parse_distributions("  NAME   STATE    VERSION\n* Alpine Running  2\n");
    assert_eq!(dists.len(), 1);
    assert_eq!(dists[0].name, "Alpine");
    assert!(dists[0].default);
}

#[test]
fn full_detection_on_windows_host() {
    let mut detector = DependencyDetector::with_runner(CapabilityRegistry::builtin(), windows_host());
    let report = detector.detect_all();

    let wsl = report.get("wsl2").unwrap();
    assert!(wsl.installed);
    assert!(wsl.compatible);
    assert_eq!(wsl.version.as_deref(), Some("2.0.9.0"));
    assert_eq!(wsl.distributions.as_ref().unwrap().len(), 2);
    assert_eq!(wsl.details.as_ref().unwrap()["hasAlpine"], true);

    let node = report.get("nodejs").unwrap();
    assert!(node.compatible);
    assert_eq!(node.location, Some(SearchLocation::Virtualized));
    assert_eq!(node.version.as_deref(), Some("20.11.0"));

    let git = report.get("git").unwrap();
    assert!(git.installed);
    assert!(!git.compatible);
    assert!(git.should_install);

    assert!(!report.get("curl").unwrap().should_install);
    assert!(report.get("claude").unwrap().should_install);
    assert_eq!(report.to_install(), vec!["git", "claude"]);
}

#[test]
fn missing_virtualization_layer() {
    let detector = DependencyDetector::with_runner(CapabilityRegistry::builtin(), MockRunner::new());
    let wsl = detector.detect("wsl2").unwrap();
    assert!(!wsl.installed);
    assert!(wsl.should_install);
    assert_eq!(wsl.error.as_deref(), Some("WSL not found or not accessible"));
    assert!(wsl.distributions.unwrap().is_empty());
}

#[test]
fn unknown_capability() {
    let detector = DependencyDetector::with_runner(CapabilityRegistry::builtin(), MockRunner::new());
    let err = detector.detect("docker").unwrap_err();
    assert!(matches!(err, InstallError::UnknownCapability { .. }));
}

#[test]
fn summary_for_one_present_one_missing() {
    let mut registry = CapabilityRegistry::empty();
    let builtin = CapabilityRegistry::builtin();
    registry.register(builtin.get("git").unwrap().clone());
    registry.register(builtin.get("curl").unwrap().clone());

    let runner = MockRunner::new().respond("git --version", "git version 2.43.0");
    let mut detector = DependencyDetector::with_runner(registry, runner);
    assert_eq!(detector.generate_summary(), NO_RESULTS_MESSAGE);

    detector.detect_all();
    let summary = detector.generate_summary();
    assert!(summary.contains("Components to install: 1/2"));
    assert!(summary.contains("Will use existing"));
    assert!(summary.contains("Will install"));
    assert!(summary.contains("Estimated installation time: 2-5 minutes"));
}

#[test]
fn concurrent_detection_matches_sequential() {
    let mut a = DependencyDetector::with_runner(CapabilityRegistry::builtin(), windows_host());
    let mut b = DependencyDetector::with_runner(CapabilityRegistry::builtin(), windows_host());
    assert_eq!(a.detect_all().clone(), b.detect_all_concurrent().clone());
}
