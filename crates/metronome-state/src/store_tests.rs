use super::*;
use metronome_resource::JobSpec;
use tempfile::TempDir;

fn record(name: &str) -> ManagedRecord {
    ManagedRecord::created(JobSpec::new(name, "d", "alpine:3.18", 0.5, 512, 100), name)
}

#[tokio::test]
async fn test_memory_store_put_get_remove() {
    let store = MemoryStateStore::new();
    store.put(&record("etl-job")).await.unwrap();

    let loaded = store.get("etl-job").await.unwrap().unwrap();
    assert_eq!(loaded.identity.as_deref(), Some("etl-job"));

    store.remove("etl-job").await.unwrap();
    assert!(store.get("etl-job").await.unwrap().is_none());
}

#[tokio::test]
async fn test_memory_store_list_ordered() {
    let store = MemoryStateStore::default();
    for name in ["zeta", "alpha", "mid"] {
        store.put(&record(name)).await.unwrap();
    }

    let names: Vec<_> = store.list().await.unwrap().into_iter().map(|r| r.name).collect();
    assert_eq!(names, vec!["alpha", "mid", "zeta"]);
}

#[tokio::test]
async fn test_file_store_missing_file_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStateStore::new(temp_dir.path().join("state.json"));

    assert!(store.list().await.unwrap().is_empty());
    assert!(store.get("etl-job").await.unwrap().is_none());
}

#[tokio::test]
async fn test_file_store_persists_across_instances() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("state.json");

    let store = FileStateStore::new(&path);
    store.put(&record("etl-job")).await.unwrap();
    store.put(&record("report")).await.unwrap();

    let reopened = FileStateStore::new(&path);
    let records = reopened.list().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "etl-job");
    assert_eq!(records[0].spec.mem, 512);
    assert!(!temp_dir.path().join("nested").join("state.json.tmp").exists());
}

#[tokio::test]
async fn test_file_store_put_replaces() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStateStore::new(temp_dir.path().join("state.json"));

    store.put(&record("etl-job")).await.unwrap();
    let updated = record("etl-job").with_spec(
        JobSpec::new("etl-job", "d", "alpine:3.18", 0.5, 512, 100).with_label("team", "data"),
    );
    store.put(&updated).await.unwrap();

    let records = store.list().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].spec.labels["team"], "data");
}

#[tokio::test]
async fn test_file_store_remove() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStateStore::new(temp_dir.path().join("state.json"));

    store.put(&record("etl-job")).await.unwrap();
    store.remove("etl-job").await.unwrap();
    store.remove("never-existed").await.unwrap();

    assert!(store.get("etl-job").await.unwrap().is_none());
}

#[tokio::test]
async fn test_file_store_rejects_other_schema_version() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("state.json");
    std::fs::write(&path, r#"{"schema_version": 99, "records": {}}"#).unwrap();

    let store = FileStateStore::new(&path);
    match store.list().await {
        Err(StateError::SchemaVersion { found, expected }) => {
            assert_eq!(found, 99);
            assert_eq!(expected, SCHEMA_VERSION);
        }
        other => panic!("Expected SchemaVersion error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_file_store_corrupt_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("state.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = FileStateStore::new(&path);
    assert!(matches!(
        store.get("etl-job").await,
        Err(StateError::Serialization(_))
    ));
}

#[tokio::test]
async fn test_file_store_empty_file_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("state.json");
    std::fs::write(&path, "").unwrap();

    let store = FileStateStore::new(&path);
    assert!(store.list().await.unwrap().is_empty());
}
