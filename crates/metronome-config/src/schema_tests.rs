use super::*;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert!(config.provider.dcos_url.is_empty());
    assert_eq!(config.provider.metronome_path, "/service/metronome");
    assert_eq!(config.provider.request_timeout_seconds, 60);
    assert!(config.provider.ssl_verify);
    assert!(config.jobs.is_empty());
}

#[test]
fn test_default_timeouts() {
    let timeouts = TimeoutsConfig::default();
    assert_eq!(timeouts.create_seconds, 600);
    assert_eq!(timeouts.update_seconds, 600);
    assert_eq!(timeouts.delete_seconds, 1200);
}

#[test]
fn test_default_state_path() {
    assert_eq!(StateConfig::default().path, "metronome.state.json");
}

#[test]
fn test_job_config_new() {
    let job = JobConfig::new("etl-job", "nightly etl", "alpine:3.18", 0.5, 512, 100);
    assert_eq!(job.name, "etl-job");
    assert_eq!(job.cpus, 0.5);
    assert!(job.labels.is_empty());
    assert!(job.args.is_empty());
    assert!(!job.has_artifact_fields());
}

#[test]
fn test_has_artifact_fields_with_flag_only() {
    let mut job = JobConfig::new("a", "b", "c", 1.0, 1, 0);
    job.artifacts_cache = Some(false);
    assert!(job.has_artifact_fields());
}

#[test]
fn test_job_config_rejects_unknown_field() {
    let content = r#"
        name = "etl-job"
        description = "d"
        docker_image = "alpine"
        cpus = 0.5
        mem = 512
        disk = 100
        artificats_exectuable = true
    "#;
    let result: Result<JobConfig, _> = toml::from_str(content);
    assert!(result.is_err());
}

#[test]
fn test_job_config_requires_image() {
    let content = r#"
        name = "etl-job"
        description = "d"
        cpus = 0.5
        mem = 512
        disk = 100
    "#;
    let result: Result<JobConfig, _> = toml::from_str(content);
    assert!(result.is_err());
}

#[test]
fn test_lookup_job_by_name() {
    let config = Config {
        jobs: vec![
            JobConfig::new("one", "d", "alpine", 1.0, 32, 0),
            JobConfig::new("two", "d", "alpine", 1.0, 32, 0),
        ],
        ..Default::default()
    };
    assert_eq!(config.job("two").map(|j| j.name.as_str()), Some("two"));
    assert!(config.job("three").is_none());
}
