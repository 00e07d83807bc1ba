//! Typed desired state of a managed job.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use metronome_config::JobConfig;
use metronome_protocols::{
    is_valid_job_id, JobArtifact, JobDocker, JobRun, MetronomeJob, ResourceError,
};

/// Desired state of one job. Built once per lifecycle call and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSpec {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub cmd: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub artifact: Option<ArtifactSpec>,
    pub docker_image: String,
    pub cpus: f64,
    pub mem: i64,
    pub disk: i64,
}

/// The single optional artifact attached to a job run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSpec {
    pub uri: String,
    #[serde(default)]
    pub executable: bool,
    #[serde(default)]
    pub extract: bool,
    #[serde(default)]
    pub cache: bool,
}

impl ArtifactSpec {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Default::default()
        }
    }

    fn to_wire(&self) -> JobArtifact {
        JobArtifact {
            uri: self.uri.clone(),
            executable: self.executable,
            extract: self.extract,
            cache: self.cache,
        }
    }
}

impl JobSpec {
    /// Minimal spec with the required fields set.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        docker_image: impl Into<String>,
        cpus: f64,
        mem: i64,
        disk: i64,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            labels: BTreeMap::new(),
            cmd: None,
            args: Vec::new(),
            artifact: None,
            docker_image: docker_image.into(),
            cpus,
            mem,
            disk,
        }
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn with_cmd(mut self, cmd: impl Into<String>) -> Self {
        self.cmd = Some(cmd.into());
        self
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_artifact(mut self, artifact: ArtifactSpec) -> Self {
        self.artifact = Some(artifact);
        self
    }

    /// Check the invariants the remote service relies on.
    pub fn validate(&self) -> Result<(), ResourceError> {
        if self.name.trim().is_empty() {
            return Err(ResourceError::invalid_spec("name", "cannot be empty"));
        }
        if !is_valid_job_id(&self.name) {
            return Err(ResourceError::invalid_spec(
                "name",
                "must be lowercase alphanumerics and '-' in dot-separated segments",
            ));
        }
        if self.docker_image.trim().is_empty() {
            return Err(ResourceError::invalid_spec("docker_image", "cannot be empty"));
        }
        if self.cpus.is_nan() || self.cpus <= 0.0 {
            return Err(ResourceError::invalid_spec("cpus", "must be greater than 0"));
        }
        if self.mem <= 0 {
            return Err(ResourceError::invalid_spec("mem", "must be greater than 0"));
        }
        if self.disk < 0 {
            return Err(ResourceError::invalid_spec("disk", "cannot be negative"));
        }
        if let Some(artifact) = &self.artifact {
            if artifact.uri.is_empty() {
                return Err(ResourceError::invalid_spec("artifacts_uri", "cannot be empty"));
            }
        }
        Ok(())
    }

    /// Build the remote job request.
    ///
    /// Optional members are only set when present; the artifact, if any, is
    /// sent as a one-element list.
    pub fn to_request(&self) -> MetronomeJob {
        let mut run = JobRun {
            cpus: self.cpus,
            mem: self.mem,
            disk: self.disk,
            ..Default::default()
        };

        if let Some(cmd) = self.cmd.as_deref().filter(|c| !c.is_empty()) {
            run.cmd = Some(cmd.to_string());
        }

        if !self.args.is_empty() {
            run.args = self.args.clone();
        }

        run.artifacts = self.artifact.iter().map(ArtifactSpec::to_wire).collect();
        run.docker = Some(JobDocker {
            image: self.docker_image.clone(),
        });

        MetronomeJob {
            id: self.name.clone(),
            description: self.description.clone(),
            labels: self.labels.clone(),
            run,
        }
    }
}

impl TryFrom<&JobConfig> for JobSpec {
    type Error = ResourceError;

    fn try_from(config: &JobConfig) -> Result<Self, Self::Error> {
        let artifact = if config.has_artifact_fields() {
            let uri = config.artifacts_uri.clone().ok_or_else(|| {
                ResourceError::invalid_spec(
                    "artifacts_uri",
                    "required when any artifacts_* field is set",
                )
            })?;
            let mut artifact = ArtifactSpec::new(uri);
            if let Some(executable) = config.artifacts_executable {
                artifact.executable = executable;
            }
            if let Some(extract) = config.artifacts_extract {
                artifact.extract = extract;
            }
            if let Some(cache) = config.artifacts_cache {
                artifact.cache = cache;
            }
            Some(artifact)
        } else {
            None
        };

        let spec = Self {
            name: config.name.clone(),
            description: config.description.clone(),
            labels: config.labels.clone(),
            cmd: config.cmd.clone().filter(|c| !c.is_empty()),
            args: config.args.clone(),
            artifact,
            docker_image: config.docker_image.clone(),
            cpus: config.cpus,
            mem: config.mem,
            disk: config.disk,
        };
        spec.validate()?;
        Ok(spec)
    }
}

#[cfg(test)]
#[path = "spec_tests.rs"]
mod tests;
