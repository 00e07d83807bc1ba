//! Remote job definitions.
//!
//! These types mirror the JSON documents exchanged with the Metronome
//! `/v1/jobs` endpoints.

mod id;
mod types;

pub use id::{is_valid_job_id, JOB_ID_PATTERN};
pub use types::*;
