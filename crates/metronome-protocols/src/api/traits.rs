//! Job API client trait definition.

use async_trait::async_trait;

use super::ApiResponse;
use crate::error::ClientError;
use crate::job::MetronomeJob;

/// Client for the remote job-scheduling API.
///
/// Implementations return every HTTP exchange as an [`ApiResponse`], whatever
/// its status. Only transport-level failures become a [`ClientError`].
/// Implementations must be safe to share across independent managed objects.
#[async_trait]
pub trait JobsApi: Send + Sync {
    /// Create a job. The service answers `201 Created` on success.
    async fn create_job(&self, job: &MetronomeJob) -> Result<ApiResponse<MetronomeJob>, ClientError>;

    /// Fetch a job by id. The service answers `200 OK` when it exists.
    async fn get_job(&self, id: &str) -> Result<ApiResponse<MetronomeJob>, ClientError>;

    /// Delete a job by id. The service answers `200 OK` on success.
    async fn delete_job(&self, id: &str) -> Result<ApiResponse<()>, ClientError>;
}
