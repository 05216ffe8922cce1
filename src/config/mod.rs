//! Configuration loading for installkit.
//!
//! Handles the optional `installkit.yml` file: parsing, capability
//! overrides, and merging with command-line path overrides into a
//! [`TrackerConfig`](crate::progress::TrackerConfig).

pub mod loader;
pub mod schema;

pub use loader::{
    load_config, load_config_file, parse_config, PathOverrides, DEFAULT_CONFIG_FILE,
    DEFAULT_TOTAL_STEPS,
};
pub use schema::{DetectionSettings, InstallerConfig, ProgressSettings};
