//! Aggregate dependency detection.
//!
//! The `DependencyDetector` owns an immutable [`CapabilityRegistry`], runs
//! one probe per capability, and keeps the last report for summary
//! generation. A probe error never aborts detection of the others; it is
//! recorded as a negative result carrying the error message.

use std::thread;

use crate::error::{InstallError, Result};

use super::probe::{probe, CommandRunner, SystemRunner};
use super::registry::CapabilityRegistry;
use super::report::{DetectionReport, NO_RESULTS_MESSAGE};
use super::result::DetectionResult;

/// Detects host capabilities needed before installation.
pub struct DependencyDetector {
    registry: CapabilityRegistry,
    runner: Box<dyn CommandRunner>,
    results: Option<DetectionReport>,
}

impl Default for DependencyDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyDetector {
    /// Create a detector for the built-in capabilities, probing the real host.
    pub fn new() -> Self {
        Self::with_runner(CapabilityRegistry::builtin(), SystemRunner::new())
    }

    /// Create a detector with a custom registry and command runner.
    pub fn with_runner(registry: CapabilityRegistry, runner: impl CommandRunner + 'static) -> Self {
        Self {
            registry,
            runner: Box::new(runner),
            results: None,
        }
    }

    /// The capability registry.
    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    /// Probe a single capability.
    ///
    /// Fails with `UnknownCapability` for keys not in the registry, or with
    /// the probe's own error.
    pub fn detect(&self, key: &str) -> Result<DetectionResult> {
        let entry = self
            .registry
            .get(key)
            .ok_or_else(|| InstallError::UnknownCapability {
                key: key.to_string(),
            })?;
        tracing::debug!("Checking {}...", entry.name);
        probe(self.runner.as_ref(), entry)
    }

    fn detect_or_failed(&self, key: &str) -> DetectionResult {
        self.detect(key).unwrap_or_else(|e| {
            tracing::warn!("Detection of '{}' failed: {}", key, e);
            DetectionResult::failed(&e.to_string())
        })
    }

    /// Probe every registered capability in registry order.
    pub fn detect_all(&mut self) -> &DetectionReport {
        tracing::info!("Starting dependency detection...");
        let mut report = DetectionReport::new();
        for key in self.registry.keys() {
            report.insert(key, self.detect_or_failed(key));
        }
        self.results.insert(report)
    }

    /// Probe every registered capability on its own thread.
    ///
    /// Produces the same report as [`detect_all`](Self::detect_all); only
    /// wall-clock time differs.
    pub fn detect_all_concurrent(&mut self) -> &DetectionReport {
        tracing::info!("Starting dependency detection (concurrent)...");
        let this = &*self;
        let results: Vec<(String, DetectionResult)> = thread::scope(|scope| {
            let handles: Vec<_> = this
                .registry
                .keys()
                .map(|key| (key, scope.spawn(move || this.detect_or_failed(key))))
                .collect();

            handles
                .into_iter()
                .map(|(key, handle)| {
                    let result = handle
                        .join()
                        .unwrap_or_else(|_| DetectionResult::failed("probe panicked"));
                    (key.to_string(), result)
                })
                .collect()
        });

        let mut report = DetectionReport::new();
        for (key, result) in results {
            report.insert(&key, result);
        }
        self.results.insert(report)
    }

    /// The report from the last detection run.
    pub fn results(&self) -> Option<&DetectionReport> {
        self.results.as_ref()
    }

    /// Plain-text summary of the last detection run.
    pub fn generate_summary(&self) -> String {
        match &self.results {
            Some(report) => report.render_summary(&self.registry),
            None => NO_RESULTS_MESSAGE.to_string(),
        }
    }
}
