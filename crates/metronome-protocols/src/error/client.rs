//! Job API client errors.

use thiserror::Error;

/// Transport-level failures raised by a [`crate::JobsApi`] implementation.
///
/// Non-success HTTP statuses are not errors at this layer; they are returned
/// inside [`crate::ApiResponse`] and judged by the caller.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Failed to decode response body: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_network() {
        let err = ClientError::Network("Connection refused".to_string());
        assert!(err.to_string().contains("Network error"));
        assert!(err.to_string().contains("Connection refused"));
    }

    #[test]
    fn test_client_error_timeout() {
        let err = ClientError::Timeout(30);
        assert!(err.to_string().contains("Timeout"));
        assert!(err.to_string().contains("30"));
    }

    #[test]
    fn test_client_error_decode() {
        let err = ClientError::Decode("expected value at line 1".to_string());
        assert!(err.to_string().contains("decode"));
    }

    #[test]
    fn test_client_error_invalid_url() {
        let err = ClientError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_client_error_debug() {
        let err = ClientError::Network("test".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Network"));
    }
}
