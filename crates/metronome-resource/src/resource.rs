//! Job resource controller.

use std::sync::Arc;

use tracing::{info, trace, warn};

use metronome_protocols::{status, ClientError, JobsApi, MetronomeJob, ResourceError};

use crate::spec::JobSpec;

/// Lifecycle of one managed job as seen by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Absent,
    Creating,
    Present,
    Deleting,
}

/// Drives one managed job through create, read, update and delete.
///
/// The identity is the job name. It is set only once the remote service has
/// confirmed the create and cleared only once it has confirmed the delete.
pub struct JobResource {
    client: Arc<dyn JobsApi>,
    identity: Option<String>,
    state: LifecycleState,
}

impl JobResource {
    /// Controller for a job that is not managed yet.
    pub fn new(client: Arc<dyn JobsApi>) -> Self {
        Self {
            client,
            identity: None,
            state: LifecycleState::Absent,
        }
    }

    /// Controller for a job the host already manages under `identity`.
    pub fn with_identity(client: Arc<dyn JobsApi>, identity: impl Into<String>) -> Self {
        Self {
            client,
            identity: Some(identity.into()),
            state: LifecycleState::Present,
        }
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Create the remote job. Succeeds only on `201 Created`.
    pub async fn create(&mut self, spec: &JobSpec) -> Result<String, ResourceError> {
        spec.validate()?;
        let request = spec.to_request();

        self.state = LifecycleState::Creating;
        info!("Creating Metronome job: {}", spec.name);

        let response = match self.client.create_job(&request).await {
            Ok(response) => response,
            Err(e) => {
                self.state = LifecycleState::Absent;
                return Err(e.into());
            }
        };

        if response.status != status::CREATED {
            self.state = LifecycleState::Absent;
            return Err(ResourceError::unexpected_status(
                "create",
                status::CREATED,
                response.status,
            ));
        }

        info!("Metronome job successfully created ({})", spec.name);
        trace!("Metronome job response object: {:?}", response.body);

        self.identity = Some(spec.name.clone());
        self.state = LifecycleState::Present;
        Ok(spec.name.clone())
    }

    /// Fetch the remote job. Succeeds only on `200 OK`.
    ///
    /// The fetched job is returned as-is; nothing is reconciled into local
    /// state.
    pub async fn read(&self, name: &str) -> Result<MetronomeJob, ResourceError> {
        info!("Reading Metronome job ({})", name);
        let response = self.client.get_job(name).await?;

        match response.status {
            status::OK => {}
            status::NOT_FOUND => return Err(ResourceError::NotFound(name.to_string())),
            actual => return Err(ResourceError::unexpected_status("read", status::OK, actual)),
        }

        trace!("Metronome job response object: {:?}", response.body);
        let job = response
            .body
            .ok_or_else(|| ClientError::Decode("empty response body".to_string()))?;

        info!("Metronome job successfully retrieved ({})", name);
        Ok(job)
    }

    /// Verify the job still exists.
    ///
    /// Every field but `labels` forces recreation, and label changes are not
    /// pushed to the remote service, so this issues no mutating call.
    pub async fn update(&self, spec: &JobSpec) -> Result<(), ResourceError> {
        let remote = self.read(&spec.name).await?;
        if remote.labels != spec.labels {
            warn!(
                "Label changes for Metronome job {} are not propagated to the remote job",
                spec.name
            );
        }
        Ok(())
    }

    /// Delete the remote job. Succeeds only on `200 OK`.
    ///
    /// On failure the identity is kept so the caller can retry.
    pub async fn delete(&mut self, name: &str) -> Result<(), ResourceError> {
        let previous = self.state;
        self.state = LifecycleState::Deleting;
        info!("Attempting to delete Metronome job ({})", name);

        let response = match self.client.delete_job(name).await {
            Ok(response) => response,
            Err(e) => {
                self.state = previous;
                return Err(e.into());
            }
        };

        if response.status != status::OK {
            self.state = previous;
            return Err(ResourceError::unexpected_status(
                "delete",
                status::OK,
                response.status,
            ));
        }

        info!("Metronome job successfully deleted ({})", name);
        self.identity = None;
        self.state = LifecycleState::Absent;
        Ok(())
    }

    /// Adopting an existing remote job is not supported.
    pub fn import(&mut self, name: &str) -> Result<(), ResourceError> {
        warn!("Refusing to import Metronome job ({})", name);
        Err(ResourceError::ImportUnsupported)
    }
}

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;
