//! Job id grammar.

use std::sync::LazyLock;

use regex::Regex;

/// Dot-separated segments of lowercase alphanumerics and `-`, neither
/// starting nor ending with `-`.
pub const JOB_ID_PATTERN: &str =
    r"^([a-z0-9]|[a-z0-9][a-z0-9\-]*[a-z0-9])(\.([a-z0-9]|[a-z0-9][a-z0-9\-]*[a-z0-9]))*$";

static JOB_ID: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(JOB_ID_PATTERN).ok());

/// Whether `id` is accepted by Metronome as a job id.
pub fn is_valid_job_id(id: &str) -> bool {
    JOB_ID.as_ref().is_some_and(|re| re.is_match(id))
}
