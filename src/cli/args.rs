//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// installkit - Installer progress tracking and dependency detection.
#[derive(Debug, Parser)]
#[command(name = "installkit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default installkit.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Progress document path
    #[arg(long, global = true, env = "INSTALLKIT_STATE_FILE")]
    pub state_file: Option<PathBuf>,

    /// Integration update document path
    #[arg(long, global = true, env = "INSTALLKIT_UPDATE_FILE")]
    pub update_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Detect installed dependencies and report what needs installing
    Detect(DetectArgs),

    /// Show recorded installation progress
    Status(StatusArgs),

    /// Delete the progress and update documents
    Clean(CleanArgs),

    /// Run a sample installation through the progress tracker
    Simulate(SimulateArgs),
}

/// Arguments for the `detect` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct DetectArgs {
    /// Print the raw results as JSON
    #[arg(long)]
    pub json: bool,

    /// Probe all capabilities in parallel
    #[arg(long)]
    pub concurrent: bool,
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {
    /// Print the progress document and summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `clean` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CleanArgs {}

/// Arguments for the `simulate` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SimulateArgs {
    /// Step budget (defaults to the config file value, then 5)
    #[arg(long)]
    pub total_steps: Option<u32>,

    /// Keep the progress documents instead of cleaning up
    #[arg(long)]
    pub keep: bool,
}
