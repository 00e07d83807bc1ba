//! State store errors.

use thiserror::Error;

/// State store error types.
#[derive(Debug, Error)]
pub enum StateError {
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The state file was written by an incompatible schema.
    #[error("Unsupported state schema version {found} (expected {expected})")]
    SchemaVersion { found: u32, expected: u32 },
}
