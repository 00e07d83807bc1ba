//! # Metronome Protocols
//!
//! Core protocol definitions for the Metronome job resource provider.
//! Contains types, interface definitions and the job id grammar - no
//! implementations.
//!
//! ## Core Items
//!
//! - [`JobsApi`] - Trait for clients of the remote job-scheduling API
//! - [`MetronomeJob`] - Wire representation of a remote job definition
//! - [`ApiResponse`] - Status code plus optional decoded body
//! - [`ResourceError`] - Failures surfaced to the orchestration host

pub mod api;
pub mod error;
pub mod job;

// Re-export core items
pub use api::{ApiResponse, JobsApi, status};
pub use error::{ClientError, ResourceError};
pub use job::{is_valid_job_id, JobArtifact, JobDocker, JobRun, MetronomeJob};
