//! # Metronome State
//!
//! The host's record of managed jobs. This record, not the remote service,
//! is the source of truth for which jobs are managed and with what spec.

pub mod error;
pub mod record;
pub mod store;

pub use error::StateError;
pub use record::ManagedRecord;
pub use store::{FileStateStore, MemoryStateStore, StateStore};
