//! Plan execution against the remote job service and the state store.
//!
//! Every remote operation runs under the timeout budget of its kind. A job is
//! recorded in the state store only after the service confirmed its create,
//! and its record is dropped only after the service confirmed its delete.

use std::collections::BTreeSet;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use tracing::{info, warn};

use metronome_config::TimeoutsConfig;
use metronome_protocols::{JobsApi, ResourceError};
use metronome_resource::{JobResource, JobSpec, Plan};
use metronome_state::{ManagedRecord, StateStore};

/// Time budgets of the remote operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Timeouts {
    pub create: Duration,
    pub update: Duration,
    pub delete: Duration,
}

impl From<&TimeoutsConfig> for Timeouts {
    fn from(config: &TimeoutsConfig) -> Self {
        Self {
            create: Duration::from_secs(config.create_seconds),
            update: Duration::from_secs(config.update_seconds),
            delete: Duration::from_secs(config.delete_seconds),
        }
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self::from(&TimeoutsConfig::default())
    }
}

/// What apply or destroy would do to one job.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Change {
    /// Job is in the configuration.
    Apply(Plan),
    /// Job is only in the state store.
    Destroy,
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Apply(plan) => write!(f, "{}", plan),
            Change::Destroy => write!(f, "destroy"),
        }
    }
}

/// Result of applying one job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Created,
    Replaced,
    Updated,
    Unchanged,
    Destroyed,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::Created => "created",
            Outcome::Replaced => "replaced",
            Outcome::Updated => "updated",
            Outcome::Unchanged => "unchanged",
            Outcome::Destroyed => "destroyed",
        };
        f.write_str(s)
    }
}

/// Result of refreshing one managed job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RefreshStatus {
    Present,
    Missing,
}

/// Drives job resources for a set of desired specs.
pub(crate) struct Host {
    client: Arc<dyn JobsApi>,
    store: Arc<dyn StateStore>,
    timeouts: Timeouts,
}

impl Host {
    pub fn new(client: Arc<dyn JobsApi>, store: Arc<dyn StateStore>, timeouts: Timeouts) -> Self {
        Self {
            client,
            store,
            timeouts,
        }
    }

    /// Compute the changes apply would make. No remote calls.
    pub async fn plan(&self, desired: &[JobSpec]) -> Result<Vec<(String, Change)>> {
        let mut changes = Vec::new();
        for spec in desired {
            let record = self.managed_record(&spec.name).await?;
            let plan = Plan::for_spec(record.as_ref().map(|r| &r.spec), spec);
            changes.push((spec.name.clone(), Change::Apply(plan)));
        }
        for name in self.orphans(desired).await? {
            changes.push((name, Change::Destroy));
        }
        Ok(changes)
    }

    /// Bring the remote service in line with `desired`.
    ///
    /// Stops at the first failure. Jobs handled before it keep their new state.
    pub async fn apply(&self, desired: &[JobSpec]) -> Result<Vec<(String, Outcome)>> {
        let mut outcomes = Vec::new();
        for spec in desired {
            let outcome = self
                .apply_job(spec)
                .await
                .with_context(|| format!("Failed to apply job '{}'", spec.name))?;
            outcomes.push((spec.name.clone(), outcome));
        }
        for name in self.orphans(desired).await? {
            self.destroy_job(&name)
                .await
                .with_context(|| format!("Failed to destroy job '{}'", name))?;
            outcomes.push((name, Outcome::Destroyed));
        }
        Ok(outcomes)
    }

    pub async fn apply_job(&self, spec: &JobSpec) -> Result<Outcome> {
        let record = self.managed_record(&spec.name).await?;
        let plan = Plan::for_spec(record.as_ref().map(|r| &r.spec), spec);
        info!("Job '{}': {}", spec.name, plan);

        match (plan, record) {
            (Plan::Create, _) => {
                self.create(spec).await?;
                Ok(Outcome::Created)
            }
            (Plan::Replace { .. }, Some(record)) => {
                self.delete(&record).await?;
                self.create(spec).await?;
                Ok(Outcome::Replaced)
            }
            (Plan::Update { .. }, Some(record)) => {
                let resource = self.resource_for(&record)?;
                with_timeout(self.timeouts.update, "update", &spec.name, resource.update(spec))
                    .await?;
                self.store.put(&record.with_spec(spec.clone())).await?;
                Ok(Outcome::Updated)
            }
            (Plan::NoChange, Some(record)) => {
                let resource = self.resource_for(&record)?;
                with_timeout(self.timeouts.update, "read", &spec.name, resource.read(&spec.name))
                    .await?;
                Ok(Outcome::Unchanged)
            }
            (plan, None) => Err(anyhow!("plan '{}' for job '{}' has no saved record", plan, spec.name)),
        }
    }

    /// Delete one managed job and forget it.
    pub async fn destroy_job(&self, name: &str) -> Result<()> {
        let record = self
            .managed_record(name)
            .await?
            .ok_or_else(|| anyhow!("job '{}' is not managed", name))?;
        self.delete(&record).await
    }

    /// Delete every managed job, or only `name` when given.
    pub async fn destroy(&self, name: Option<&str>) -> Result<Vec<String>> {
        let names = match name {
            Some(name) => vec![name.to_string()],
            None => self.managed_names().await?,
        };
        for name in &names {
            self.destroy_job(name)
                .await
                .with_context(|| format!("Failed to destroy job '{}'", name))?;
        }
        Ok(names)
    }

    /// Read every managed job. Missing jobs are reported, not forgotten.
    pub async fn refresh(&self) -> Result<Vec<(String, RefreshStatus)>> {
        let mut statuses = Vec::new();
        for record in self.store.list().await? {
            if !record.is_managed() {
                continue;
            }
            let resource = self.resource_for(&record)?;
            let status = match with_timeout(
                self.timeouts.update,
                "read",
                &record.name,
                resource.read(&record.name),
            )
            .await
            {
                Ok(_) => RefreshStatus::Present,
                Err(e) if is_not_found(&e) => {
                    warn!("Managed job '{}' no longer exists remotely", record.name);
                    RefreshStatus::Missing
                }
                Err(e) => return Err(e.context(format!("Failed to refresh job '{}'", record.name))),
            };
            statuses.push((record.name, status));
        }
        Ok(statuses)
    }

    async fn create(&self, spec: &JobSpec) -> Result<()> {
        let mut resource = JobResource::new(self.client.clone());
        let identity =
            with_timeout(self.timeouts.create, "create", &spec.name, resource.create(spec)).await?;
        self.store
            .put(&ManagedRecord::created(spec.clone(), identity))
            .await?;
        Ok(())
    }

    async fn delete(&self, record: &ManagedRecord) -> Result<()> {
        let mut resource = self.resource_for(record)?;
        with_timeout(
            self.timeouts.delete,
            "delete",
            &record.name,
            resource.delete(&record.name),
        )
        .await?;
        self.store.remove(&record.name).await?;
        info!("Job '{}' destroyed", record.name);
        Ok(())
    }

    fn resource_for(&self, record: &ManagedRecord) -> Result<JobResource> {
        let identity = record
            .identity
            .as_deref()
            .ok_or_else(|| anyhow!("job '{}' is not managed", record.name))?;
        Ok(JobResource::with_identity(self.client.clone(), identity))
    }

    async fn managed_record(&self, name: &str) -> Result<Option<ManagedRecord>> {
        Ok(self.store.get(name).await?.filter(ManagedRecord::is_managed))
    }

    async fn managed_names(&self) -> Result<Vec<String>> {
        Ok(self
            .store
            .list()
            .await?
            .into_iter()
            .filter(ManagedRecord::is_managed)
            .map(|r| r.name)
            .collect())
    }

    async fn orphans(&self, desired: &[JobSpec]) -> Result<Vec<String>> {
        let wanted: BTreeSet<&str> = desired.iter().map(|s| s.name.as_str()).collect();
        Ok(self
            .managed_names()
            .await?
            .into_iter()
            .filter(|name| !wanted.contains(name.as_str()))
            .collect())
    }
}

async fn with_timeout<T>(
    budget: Duration,
    operation: &str,
    name: &str,
    call: impl Future<Output = Result<T, ResourceError>>,
) -> Result<T> {
    match tokio::time::timeout(budget, call).await {
        Ok(result) => Ok(result?),
        Err(_) => bail!(
            "{} of job '{}' timed out after {}s",
            operation,
            name,
            budget.as_secs()
        ),
    }
}

fn is_not_found(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<ResourceError>()
        .is_some_and(ResourceError::is_not_found)
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
