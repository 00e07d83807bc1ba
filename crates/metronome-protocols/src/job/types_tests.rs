use super::*;

fn sample_job() -> MetronomeJob {
    MetronomeJob {
        id: "etl-job".to_string(),
        description: "nightly etl".to_string(),
        labels: BTreeMap::new(),
        run: JobRun {
            cpus: 0.5,
            mem: 512,
            disk: 100,
            docker: Some(JobDocker {
                image: "alpine:3.18".to_string(),
            }),
            ..Default::default()
        },
    }
}

#[test]
fn test_job_serialization_omits_absent_fields() {
    let json = serde_json::to_value(sample_job()).unwrap();
    assert_eq!(json["id"], "etl-job");
    assert_eq!(json["run"]["cpus"], 0.5);
    assert_eq!(json["run"]["mem"], 512);
    assert_eq!(json["run"]["disk"], 100);
    assert_eq!(json["run"]["docker"]["image"], "alpine:3.18");
    assert!(json.get("labels").is_none());
    assert!(json["run"].get("cmd").is_none());
    assert!(json["run"].get("args").is_none());
    assert!(json["run"].get("artifacts").is_none());
}

#[test]
fn test_job_serialization_with_artifact_and_args() {
    let mut job = sample_job();
    job.labels.insert("team".to_string(), "data".to_string());
    job.run.cmd = Some("sh".to_string());
    job.run.args = vec!["-c".to_string(), "echo hi".to_string()];
    job.run.artifacts = vec![JobArtifact {
        uri: "http://x/a.tgz".to_string(),
        extract: true,
        ..Default::default()
    }];

    let json = serde_json::to_value(&job).unwrap();
    assert_eq!(json["labels"]["team"], "data");
    assert_eq!(json["run"]["cmd"], "sh");
    assert_eq!(json["run"]["args"][1], "echo hi");
    assert_eq!(json["run"]["artifacts"][0]["uri"], "http://x/a.tgz");
    assert_eq!(json["run"]["artifacts"][0]["extract"], true);
    assert_eq!(json["run"]["artifacts"][0]["executable"], false);
    assert_eq!(json["run"]["artifacts"][0]["cache"], false);
}

#[test]
fn test_job_deserialization_ignores_unknown_fields() {
    let json = serde_json::json!({
        "id": "etl-job",
        "description": "nightly etl",
        "labels": {"owner": "ops"},
        "run": {
            "cpus": 1.0,
            "mem": 128,
            "disk": 0,
            "maxLaunchDelay": 3600,
            "restart": {"policy": "NEVER"},
            "docker": {"image": "busybox", "forcePullImage": false},
            "artifacts": [{"uri": "http://x/b.tgz"}]
        },
        "schedules": []
    });

    let job: MetronomeJob = serde_json::from_value(json).unwrap();
    assert_eq!(job.id, "etl-job");
    assert_eq!(job.labels["owner"], "ops");
    assert_eq!(job.image(), Some("busybox"));
    assert_eq!(job.run.artifacts.len(), 1);
    assert!(!job.run.artifacts[0].extract);
    assert!(job.run.args.is_empty());
}

#[test]
fn test_job_deserialization_minimal() {
    let json = serde_json::json!({
        "id": "bare",
        "run": {"cpus": 0.1, "mem": 32, "disk": 0}
    });

    let job: MetronomeJob = serde_json::from_value(json).unwrap();
    assert_eq!(job.description, "");
    assert!(job.labels.is_empty());
    assert!(job.image().is_none());
}
