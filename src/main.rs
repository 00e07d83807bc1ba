//! Metronome Provider
//!
//! Declarative management of DC/OS Metronome jobs from a TOML configuration.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use metronome_client_http::MetronomeClient;
use metronome_config::{Config, ConfigLoader, ConfigValidator};
use metronome_resource::JobSpec;
use metronome_state::FileStateStore;

mod cli;
mod cmd_jobs;
mod host;

use cli::{Cli, Commands};
use host::{Host, Timeouts};

fn init_tracing(log_level: &str, log_dir: Option<&Path>) -> Result<()> {
    let file_layer = match log_dir {
        Some(log_dir) => {
            std::fs::create_dir_all(log_dir)
                .with_context(|| format!("Failed to create log directory {:?}", log_dir))?;

            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("metronome-provider")
                .filename_suffix("log")
                .max_log_files(30)
                .build(log_dir)?;

            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // Keeps the background writer alive until exit.
            static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
                std::sync::OnceLock::new();
            let _ = GUARD.set(guard);

            Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
        }
        None => None,
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(file_layer)
        .init();

    Ok(())
}

/// Load and validate the configuration, logging warnings.
fn load_config(path: &Path) -> Result<Config> {
    let config = ConfigLoader::load(path)
        .with_context(|| format!("Failed to load configuration from {:?}", path))?;

    let warnings = ConfigValidator::validate(&config)?.into_result()?;
    for warning in warnings {
        warn!("{}: {}", warning.path, warning.message);
    }

    Ok(config)
}

fn build_host(config: &Config, state_path: &Path) -> Result<Host> {
    let client = MetronomeClient::from_config(&config.provider)
        .context("Failed to create Metronome client")?;
    let store = FileStateStore::new(state_path);
    info!("Using state file {:?}", store.path());

    Ok(Host::new(
        Arc::new(client),
        Arc::new(store),
        Timeouts::from(&config.timeouts),
    ))
}

fn desired_specs(config: &Config) -> Result<Vec<JobSpec>> {
    config
        .jobs
        .iter()
        .map(|job| {
            JobSpec::try_from(job).with_context(|| format!("Invalid job '{}'", job.name))
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.log_dir.as_deref())?;

    let config = load_config(&cli.config)?;
    let state_path = cli
        .state
        .clone()
        .unwrap_or_else(|| config.state.path.clone().into());

    let desired = desired_specs(&config)?;
    let host = build_host(&config, &state_path)?;

    match cli.command {
        Commands::Validate => cmd_jobs::handle_validate(&config, &desired),
        Commands::Plan => cmd_jobs::handle_plan(&host, &desired).await,
        Commands::Apply => cmd_jobs::handle_apply(&host, &desired).await,
        Commands::Refresh => cmd_jobs::handle_refresh(&host).await,
        Commands::Destroy { name } => cmd_jobs::handle_destroy(&host, name.as_deref()).await,
    }
}
