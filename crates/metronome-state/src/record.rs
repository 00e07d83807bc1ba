//! Managed object records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use metronome_resource::{JobSpec, SCHEMA_VERSION};

/// Saved state of one managed job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagedRecord {
    /// Job name, also the record key.
    pub name: String,

    /// Spec last applied to the remote service.
    pub spec: JobSpec,

    /// Identity of the remote job. `None` once the job is no longer managed.
    pub identity: Option<String>,

    pub schema_version: u32,

    pub updated_at: DateTime<Utc>,
}

impl ManagedRecord {
    /// Record for a job whose create the remote service confirmed.
    pub fn created(spec: JobSpec, identity: impl Into<String>) -> Self {
        Self {
            name: spec.name.clone(),
            spec,
            identity: Some(identity.into()),
            schema_version: SCHEMA_VERSION,
            updated_at: Utc::now(),
        }
    }

    /// Whether the record still points at a remote job.
    pub fn is_managed(&self) -> bool {
        self.identity.is_some()
    }

    /// Replace the saved spec, keeping the identity.
    pub fn with_spec(mut self, spec: JobSpec) -> Self {
        self.spec = spec;
        self.updated_at = Utc::now();
        self
    }
}
