//! Host capability detection.
//!
//! Probes the host for the tools an installation depends on, parses their
//! version output, and decides per capability whether installation is
//! required.
//!
//! # Modules
//!
//! - [`detector`] - Aggregate detector over the capability registry
//! - [`distributions`] - Virtualization-layer distribution listing parser
//! - [`mock`] - Scripted command runner for tests
//! - [`probe`] - Per-capability probes and the command runner seam
//! - [`registry`] - Capability definitions and config overrides
//! - [`report`] - Aggregated results and the text summary
//! - [`result`] - Per-capability result type
//! - [`version`] - Dotted version comparison and extraction
//!
//! # Example
//!
//! ```
//! use installkit::detection::{CapabilityRegistry, DependencyDetector, MockRunner};
//!
//! let runner = MockRunner::new().respond("git --version", "git version 2.43.0");
//! let mut detector = DependencyDetector::with_runner(CapabilityRegistry::builtin(), runner);
//!
//! let report = detector.detect_all();
//! assert!(!report.get("git").unwrap().should_install);
//! assert!(report.get("curl").unwrap().should_install);
//! ```

pub mod detector;
pub mod distributions;
pub mod mock;
pub mod probe;
pub mod registry;
pub mod report;
pub mod result;
pub mod version;

pub use detector::DependencyDetector;
pub use distributions::{parse_distributions, Distribution};
pub use mock::MockRunner;
pub use probe::{CommandRunner, SystemRunner};
pub use registry::{CapabilityEntry, CapabilityOverride, CapabilityRegistry, ProbeKind};
pub use report::{DetectionReport, NO_RESULTS_MESSAGE};
pub use result::{DetectionResult, SearchLocation};
pub use version::compare_versions;
