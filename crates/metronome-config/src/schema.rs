//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub timeouts: TimeoutsConfig,

    #[serde(default)]
    pub state: StateConfig,

    #[serde(default)]
    pub jobs: Vec<JobConfig>,
}

impl Config {
    /// Look up a declared job by name.
    pub fn job(&self, name: &str) -> Option<&JobConfig> {
        self.jobs.iter().find(|j| j.name == name)
    }
}

/// Connection settings for the DC/OS cluster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Cluster base URL, e.g. `https://dcos.example.com`.
    #[serde(default)]
    pub dcos_url: String,

    /// ACS token sent with every request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acs_token: Option<String>,

    /// Path of the Metronome service below `dcos_url`.
    #[serde(default = "default_metronome_path")]
    pub metronome_path: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,

    #[serde(default = "default_ssl_verify")]
    pub ssl_verify: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            dcos_url: String::new(),
            acs_token: None,
            metronome_path: default_metronome_path(),
            request_timeout_seconds: default_request_timeout(),
            ssl_verify: default_ssl_verify(),
        }
    }
}

fn default_metronome_path() -> String {
    "/service/metronome".to_string()
}

fn default_request_timeout() -> u64 {
    60
}

fn default_ssl_verify() -> bool {
    true
}

/// Per-operation time budgets enforced by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutsConfig {
    #[serde(default = "default_create_timeout")]
    pub create_seconds: u64,

    #[serde(default = "default_update_timeout")]
    pub update_seconds: u64,

    #[serde(default = "default_delete_timeout")]
    pub delete_seconds: u64,
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            create_seconds: default_create_timeout(),
            update_seconds: default_update_timeout(),
            delete_seconds: default_delete_timeout(),
        }
    }
}

fn default_create_timeout() -> u64 {
    10 * 60
}

fn default_update_timeout() -> u64 {
    10 * 60
}

fn default_delete_timeout() -> u64 {
    20 * 60
}

/// Where the host keeps its record of managed jobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    #[serde(default = "default_state_path")]
    pub path: String,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: default_state_path(),
        }
    }
}

fn default_state_path() -> String {
    "metronome.state.json".to_string()
}

/// One declared job, field for field as written in the config file.
///
/// Unknown keys are rejected so a misspelled field never silently drops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobConfig {
    pub name: String,

    pub description: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmd: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifacts_uri: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifacts_executable: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifacts_extract: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifacts_cache: Option<bool>,

    pub docker_image: String,

    pub cpus: f64,

    pub mem: i64,

    pub disk: i64,
}

impl JobConfig {
    /// Minimal job with the required fields set.
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
            artifacts_uri: None,
            artifacts_executable: None,
            artifacts_extract: None,
            artifacts_cache: None,
            docker_image: docker_image.into(),
            cpus,
            mem,
            disk,
        }
    }

    /// Whether any of the flat `artifacts_*` fields is set.
    pub fn has_artifact_fields(&self) -> bool {
        self.artifacts_uri.is_some()
            || self.artifacts_executable.is_some()
            || self.artifacts_extract.is_some()
            || self.artifacts_cache.is_some()
    }
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
