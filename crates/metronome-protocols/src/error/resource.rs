//! Resource lifecycle errors.

use thiserror::Error;

use super::ClientError;

/// Errors returned by the job resource lifecycle operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// Transport or client failure, passed through unmodified.
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("{operation}: expecting response code of {expected}, but received {actual}")]
    UnexpectedStatus {
        operation: &'static str,
        expected: u16,
        actual: u16,
    },

    #[error("Job not found: {0}")]
    NotFound(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidSpec { field: String, message: String },

    #[error("Importing existing jobs is not supported")]
    ImportUnsupported,
}

impl ResourceError {
    /// Build an unexpected-status error for an operation.
    pub fn unexpected_status(operation: &'static str, expected: u16, actual: u16) -> Self {
        Self::UnexpectedStatus {
            operation,
            expected,
            actual,
        }
    }

    /// Build an invalid-spec error.
    pub fn invalid_spec(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSpec {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether the remote job was reported missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;
