//! CLI definitions for the Metronome provider.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Metronome job resource provider CLI.
#[derive(Parser)]
#[command(name = "metronome-provider")]
#[command(about = "Manage DC/OS Metronome jobs declaratively")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "metronome.toml", global = true)]
    pub config: PathBuf,

    /// State file path (overrides `[state] path` from the config)
    #[arg(short, long, global = true)]
    pub state: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Also write logs to daily-rotated files in this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Load and validate the configuration
    Validate,

    /// Show what apply would do, without calling the remote service
    Plan,

    /// Create, replace, verify or delete jobs to match the configuration
    Apply,

    /// Read every managed job and report the ones that are missing
    Refresh,

    /// Delete managed jobs
    Destroy {
        /// Only destroy this job
        #[arg(long)]
        name: Option<String>,
    },
}
