//! Metronome REST client implementation.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use metronome_config::ProviderConfig;
use metronome_protocols::{ApiResponse, ClientError, JobsApi, MetronomeJob};

const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// HTTP client for the Metronome `/v1/jobs` endpoints.
pub struct MetronomeClient {
    base_url: String,
    token: Option<String>,
    timeout_seconds: u64,
    client: reqwest::Client,
}

impl std::fmt::Debug for MetronomeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetronomeClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl MetronomeClient {
    /// Client for a Metronome endpoint reachable directly at `base_url`.
    pub fn with_url(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::build(base_url.into(), None, DEFAULT_TIMEOUT_SECONDS, true)
    }

    /// Client for the Metronome service of a DC/OS cluster.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ClientError> {
        let base_url = format!(
            "{}{}",
            config.dcos_url.trim_end_matches('/'),
            config.metronome_path
        );
        Self::build(
            base_url,
            config.acs_token.clone(),
            config.request_timeout_seconds,
            config.ssl_verify,
        )
    }

    /// Set the ACS token sent with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build(
        base_url: String,
        token: Option<String>,
        timeout_seconds: u64,
        ssl_verify: bool,
    ) -> Result<Self, ClientError> {
        let parsed = url::Url::parse(&base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .danger_accept_invalid_certs(!ssl_verify)
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            timeout_seconds,
            client,
        })
    }

    fn jobs_url(&self) -> String {
        format!("{}/v1/jobs", self.base_url)
    }

    /// URL of a single job. The id is always one percent-encoded path segment.
    fn job_url(&self, id: &str) -> Result<url::Url, ClientError> {
        let mut url = url::Url::parse(&self.jobs_url())
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .push(id);
        Ok(url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ClientError> {
        let request = match &self.token {
            Some(token) => request.header("Authorization", format!("token={}", token)),
            None => request,
        };

        request.send().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout(self.timeout_seconds)
            } else {
                ClientError::Network(e.to_string())
            }
        })
    }

    /// Turn any HTTP response into an [`ApiResponse`].
    ///
    /// The body is decoded only for non-empty 2xx responses.
    async fn into_api_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<ApiResponse<T>, ClientError> {
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if !(200..300).contains(&status) {
            debug!("Metronome answered {} with body: {}", status, text);
            return Ok(ApiResponse::empty(status));
        }

        if text.trim().is_empty() {
            return Ok(ApiResponse::empty(status));
        }

        let body = serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(ApiResponse::new(status, Some(body)))
    }
}

#[async_trait]
impl JobsApi for MetronomeClient {
    async fn create_job(&self, job: &MetronomeJob) -> Result<ApiResponse<MetronomeJob>, ClientError> {
        let url = self.jobs_url();
        debug!("POST {}", url);
        let response = self.send(self.client.post(&url).json(job)).await?;
        Self::into_api_response(response).await
    }

    async fn get_job(&self, id: &str) -> Result<ApiResponse<MetronomeJob>, ClientError> {
        let url = self.job_url(id)?;
        debug!("GET {}", url);
        let response = self.send(self.client.get(url)).await?;
        Self::into_api_response(response).await
    }

    async fn delete_job(&self, id: &str) -> Result<ApiResponse<()>, ClientError> {
        let url = self.job_url(id)?;
        debug!("DELETE {}", url);
        let response = self.send(self.client.delete(url)).await?;
        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let text = response.text().await.unwrap_or_default();
            debug!("Metronome answered {} with body: {}", status, text);
        }
        Ok(ApiResponse::empty(status))
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
