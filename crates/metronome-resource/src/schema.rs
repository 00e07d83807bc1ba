//! Field schema of the job resource.

use crate::spec::JobSpec;

/// Version of the persisted resource record layout.
pub const SCHEMA_VERSION: u32 = 1;

/// Value type of a declarative field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Bool,
    Float,
    Int,
    StringMap,
    StringList,
}

/// One row of the resource schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSchema {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// A change to this field cannot be applied in place.
    pub force_new: bool,
}

const fn required(name: &'static str, kind: FieldKind) -> FieldSchema {
    FieldSchema {
        name,
        kind,
        required: true,
        force_new: true,
    }
}

const fn optional(name: &'static str, kind: FieldKind, force_new: bool) -> FieldSchema {
    FieldSchema {
        name,
        kind,
        required: false,
        force_new,
    }
}

/// Every field of the job resource.
pub const JOB_SCHEMA: &[FieldSchema] = &[
    required("name", FieldKind::String),
    required("description", FieldKind::String),
    optional("labels", FieldKind::StringMap, false),
    optional("cmd", FieldKind::String, true),
    optional("args", FieldKind::StringList, true),
    optional("artifacts_uri", FieldKind::String, true),
    optional("artifacts_executable", FieldKind::Bool, true),
    optional("artifacts_extract", FieldKind::Bool, true),
    optional("artifacts_cache", FieldKind::Bool, true),
    required("docker_image", FieldKind::String),
    required("cpus", FieldKind::Float),
    required("mem", FieldKind::Int),
    required("disk", FieldKind::Int),
];

/// Look up a field by name.
pub fn field(name: &str) -> Option<&'static FieldSchema> {
    JOB_SCHEMA.iter().find(|f| f.name == name)
}

impl JobSpec {
    /// Names of the schema fields whose values differ from `other`.
    pub fn diff(&self, other: &JobSpec) -> Vec<&'static str> {
        let artifact_field = |spec: &JobSpec, name: &str| -> (Option<String>, bool) {
            match (&spec.artifact, name) {
                (Some(a), "artifacts_uri") => (Some(a.uri.clone()), false),
                (Some(a), "artifacts_executable") => (None, a.executable),
                (Some(a), "artifacts_extract") => (None, a.extract),
                (Some(a), "artifacts_cache") => (None, a.cache),
                _ => (None, false),
            }
        };

        JOB_SCHEMA
            .iter()
            .map(|f| f.name)
            .filter(|name| match *name {
                "name" => self.name != other.name,
                "description" => self.description != other.description,
                "labels" => self.labels != other.labels,
                "cmd" => self.cmd != other.cmd,
                "args" => self.args != other.args,
                "docker_image" => self.docker_image != other.docker_image,
                "cpus" => self.cpus != other.cpus,
                "mem" => self.mem != other.mem,
                "disk" => self.disk != other.disk,
                artifact => artifact_field(self, artifact) != artifact_field(other, artifact),
            })
            .collect()
    }

    /// Whether moving from `other` to `self` needs destroy-then-create.
    pub fn requires_replace(&self, other: &JobSpec) -> bool {
        self.diff(other)
            .iter()
            .any(|name| field(name).is_some_and(|f| f.force_new))
    }
}
