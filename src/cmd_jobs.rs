//! Job subcommand handlers.

use anyhow::{bail, Result};
use tracing::{info, warn};

use metronome_config::Config;
use metronome_resource::{JobSpec, Plan};

use crate::host::{Change, Host, RefreshStatus};

/// Report a configuration that loaded and validated.
pub(crate) fn handle_validate(config: &Config, desired: &[JobSpec]) -> Result<()> {
    println!(
        "Configuration is valid: {} job(s) against {}{}",
        desired.len(),
        config.provider.dcos_url.trim_end_matches('/'),
        config.provider.metronome_path
    );
    Ok(())
}

/// Print the change apply would make to each job.
pub(crate) async fn handle_plan(host: &Host, desired: &[JobSpec]) -> Result<()> {
    let changes = host.plan(desired).await?;
    if changes.is_empty() {
        println!("No jobs configured or managed.");
        return Ok(());
    }

    let pending = changes
        .iter()
        .filter(|(_, change)| *change != Change::Apply(Plan::NoChange))
        .count();

    for (name, change) in &changes {
        println!("  {:<30} {}", name, change);
    }
    println!();
    println!("{} job(s), {} with changes.", changes.len(), pending);
    Ok(())
}

pub(crate) async fn handle_apply(host: &Host, desired: &[JobSpec]) -> Result<()> {
    let outcomes = host.apply(desired).await?;
    for (name, outcome) in &outcomes {
        println!("  {:<30} {}", name, outcome);
    }
    info!("Apply complete: {} job(s) processed", outcomes.len());
    Ok(())
}

/// Read every managed job. Fails when any of them is gone.
pub(crate) async fn handle_refresh(host: &Host) -> Result<()> {
    let statuses = host.refresh().await?;
    let mut missing = 0;
    for (name, status) in &statuses {
        match status {
            RefreshStatus::Present => println!("  {:<30} present", name),
            RefreshStatus::Missing => {
                missing += 1;
                println!("  {:<30} missing", name);
            }
        }
    }

    if missing > 0 {
        bail!("{} managed job(s) no longer exist remotely", missing);
    }
    Ok(())
}

pub(crate) async fn handle_destroy(host: &Host, name: Option<&str>) -> Result<()> {
    let destroyed = host.destroy(name).await?;
    if destroyed.is_empty() {
        warn!("No managed jobs to destroy");
    }
    for name in &destroyed {
        println!("  {:<30} destroyed", name);
    }
    Ok(())
}
