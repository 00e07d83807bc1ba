//! # Metronome Resource
//!
//! The declarative job resource: typed desired state, the field schema that
//! decides between in-place update and recreation, and the controller that
//! drives a job through create, read, update and delete against a
//! [`JobsApi`](metronome_protocols::JobsApi) client.

mod plan;
mod resource;
mod schema;
mod spec;

pub use plan::Plan;
pub use resource::{JobResource, LifecycleState};
pub use schema::{FieldKind, FieldSchema, JOB_SCHEMA, SCHEMA_VERSION, field};
pub use spec::{ArtifactSpec, JobSpec};
