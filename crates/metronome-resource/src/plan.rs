//! Planned action for a managed job.

use std::fmt;

use crate::spec::JobSpec;

/// What the host must do to move a job from its saved state to the desired one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// Nothing is recorded yet.
    Create,
    /// A forces-recreate field changed: delete, then create.
    Replace { fields: Vec<&'static str> },
    /// Only in-place fields changed. Runs the update operation.
    Update { fields: Vec<&'static str> },
    /// Saved and desired state match. Runs a read to verify existence.
    NoChange,
}

impl Plan {
    /// Compare the saved spec (if any) with the desired one.
    pub fn for_spec(saved: Option<&JobSpec>, desired: &JobSpec) -> Self {
        let Some(saved) = saved else {
            return Plan::Create;
        };

        let fields = desired.diff(saved);
        if fields.is_empty() {
            Plan::NoChange
        } else if desired.requires_replace(saved) {
            Plan::Replace { fields }
        } else {
            Plan::Update { fields }
        }
    }

    pub fn is_mutating(&self) -> bool {
        matches!(self, Plan::Create | Plan::Replace { .. })
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plan::Create => write!(f, "create"),
            Plan::Replace { fields } => write!(f, "replace ({})", fields.join(", ")),
            Plan::Update { fields } => write!(f, "update ({})", fields.join(", ")),
            Plan::NoChange => write!(f, "no change"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> JobSpec {
        JobSpec::new("etl-job", "nightly etl", "alpine:3.18", 0.5, 512, 100)
    }

    #[test]
    fn test_plan_create_without_saved_state() {
        let plan = Plan::for_spec(None, &base());
        assert_eq!(plan, Plan::Create);
        assert!(plan.is_mutating());
    }

    #[test]
    fn test_plan_no_change() {
        let plan = Plan::for_spec(Some(&base()), &base());
        assert_eq!(plan, Plan::NoChange);
        assert!(!plan.is_mutating());
    }

    #[test]
    fn test_plan_update_for_labels() {
        let desired = base().with_label("team", "data");
        let plan = Plan::for_spec(Some(&base()), &desired);
        assert_eq!(plan, Plan::Update { fields: vec!["labels"] });
        assert!(!plan.is_mutating());
    }

    #[test]
    fn test_plan_replace_includes_label_changes() {
        let desired = base().with_label("team", "data").with_cmd("run");
        let plan = Plan::for_spec(Some(&base()), &desired);
        assert_eq!(plan, Plan::Replace { fields: vec!["labels", "cmd"] });
    }

    #[test]
    fn test_plan_display() {
        assert_eq!(Plan::Create.to_string(), "create");
        assert_eq!(Plan::NoChange.to_string(), "no change");
        assert_eq!(
            Plan::Replace { fields: vec!["cpus", "mem"] }.to_string(),
            "replace (cpus, mem)"
        );
    }
}
