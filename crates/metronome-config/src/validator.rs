//! Configuration validation.

use std::collections::HashSet;

use metronome_protocols::is_valid_job_id;

use crate::error::ConfigError;
use crate::schema::{Config, JobConfig};

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Convert the first error, if any, into a [`ConfigError`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(err) => Err(ConfigError::InvalidValue {
                field: err.path,
                message: err.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_provider(config, &mut result);
        Self::validate_timeouts(config, &mut result);
        Self::validate_jobs(config, &mut result);

        Ok(result)
    }

    fn validate_provider(config: &Config, result: &mut ValidationResult) {
        let provider = &config.provider;

        if provider.dcos_url.is_empty() {
            result.add_error(ValidationError::new(
                "provider.dcos_url",
                "dcos_url cannot be empty",
            ));
        } else {
            match url::Url::parse(&provider.dcos_url) {
                Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
                _ => result.add_error(ValidationError::new(
                    "provider.dcos_url",
                    "dcos_url must start with http:// or https://",
                )),
            }
        }

        if !provider.metronome_path.is_empty() && !provider.metronome_path.starts_with('/') {
            result.add_error(ValidationError::new(
                "provider.metronome_path",
                "metronome_path must start with '/'",
            ));
        }

        if provider.request_timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "provider.request_timeout_seconds",
                "request_timeout_seconds must be greater than 0",
            ));
        }

        if provider.acs_token.is_none() {
            result.add_warning(ValidationWarning::new(
                "provider.acs_token",
                "ACS token is not set, requests will be sent unauthenticated",
            ));
        }

        if !provider.ssl_verify {
            result.add_warning(ValidationWarning::new(
                "provider.ssl_verify",
                "TLS certificate verification is disabled",
            ));
        }
    }

    fn validate_timeouts(config: &Config, result: &mut ValidationResult) {
        let timeouts = &config.timeouts;
        for (name, value) in [
            ("create_seconds", timeouts.create_seconds),
            ("update_seconds", timeouts.update_seconds),
            ("delete_seconds", timeouts.delete_seconds),
        ] {
            if value == 0 {
                result.add_error(ValidationError::new(
                    format!("timeouts.{}", name),
                    format!("{} must be greater than 0", name),
                ));
            }
        }
    }

    fn validate_jobs(config: &Config, result: &mut ValidationResult) {
        let mut seen = HashSet::new();
        for (index, job) in config.jobs.iter().enumerate() {
            if !job.name.is_empty() && !seen.insert(job.name.as_str()) {
                result.add_error(ValidationError::new(
                    format!("jobs[{}].name", index),
                    format!("Duplicate job name '{}'", job.name),
                ));
            }
            Self::validate_job(index, job, result);
        }
    }

    /// Field-level checks for a single job.
    fn validate_job(index: usize, job: &JobConfig, result: &mut ValidationResult) {
        let path = |field: &str| format!("jobs[{}].{}", index, field);

        if job.name.trim().is_empty() {
            result.add_error(ValidationError::new(path("name"), "name cannot be empty"));
        } else if !is_valid_job_id(&job.name) {
            result.add_error(ValidationError::new(
                path("name"),
                format!(
                    "name '{}' must be lowercase alphanumerics and '-' in dot-separated segments",
                    job.name
                ),
            ));
        }

        if job.docker_image.trim().is_empty() {
            result.add_error(ValidationError::new(
                path("docker_image"),
                "docker_image cannot be empty",
            ));
        }

        if job.cpus.is_nan() || job.cpus <= 0.0 {
            result.add_error(ValidationError::new(
                path("cpus"),
                "cpus must be greater than 0",
            ));
        }

        if job.mem <= 0 {
            result.add_error(ValidationError::new(
                path("mem"),
                "mem must be greater than 0",
            ));
        }

        if job.disk < 0 {
            result.add_error(ValidationError::new(
                path("disk"),
                "disk cannot be negative",
            ));
        }

        if job.has_artifact_fields() {
            match job.artifacts_uri.as_deref() {
                None | Some("") => result.add_error(ValidationError::new(
                    path("artifacts_uri"),
                    "artifacts_uri is required when any artifacts_* field is set",
                )),
                Some(_) => {}
            }
        }

        if job.description.is_empty() {
            result.add_warning(ValidationWarning::new(
                path("description"),
                "description is empty",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
