//! Metronome job wire types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A remote job: the job descriptor plus its run specification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetronomeJob {
    pub id: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    pub run: JobRun,
}

/// Run descriptor: resources, command line, container and artifacts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRun {
    pub cpus: f64,
    pub mem: i64,
    pub disk: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmd: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<JobArtifact>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker: Option<JobDocker>,
}

/// A downloadable file fetched into the sandbox before the run starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobArtifact {
    pub uri: String,
    #[serde(default)]
    pub executable: bool,
    #[serde(default)]
    pub extract: bool,
    #[serde(default)]
    pub cache: bool,
}

/// Docker container descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDocker {
    pub image: String,
}

impl MetronomeJob {
    /// Container image of the run, if any.
    pub fn image(&self) -> Option<&str> {
        self.run.docker.as_ref().map(|d| d.image.as_str())
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
