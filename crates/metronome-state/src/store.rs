//! State storage.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use metronome_resource::SCHEMA_VERSION;

use crate::error::StateError;
use crate::record::ManagedRecord;

/// State storage trait.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Get the record for a job.
    async fn get(&self, name: &str) -> Result<Option<ManagedRecord>, StateError>;

    /// Insert or replace a record.
    async fn put(&self, record: &ManagedRecord) -> Result<(), StateError>;

    /// Remove the record for a job.
    async fn remove(&self, name: &str) -> Result<(), StateError>;

    /// List all records, ordered by name.
    async fn list(&self) -> Result<Vec<ManagedRecord>, StateError>;
}

/// In-memory state store for testing.
pub struct MemoryStateStore {
    records: RwLock<BTreeMap<String, ManagedRecord>>,
}

impl MemoryStateStore {
    /// Create a new memory store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
        }
    }
}

impl Default for MemoryStateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn get(&self, name: &str) -> Result<Option<ManagedRecord>, StateError> {
        let store = self.records.read().await;
        Ok(store.get(name).cloned())
    }

    async fn put(&self, record: &ManagedRecord) -> Result<(), StateError> {
        let mut store = self.records.write().await;
        store.insert(record.name.clone(), record.clone());
        Ok(())
    }

    async fn remove(&self, name: &str) -> Result<(), StateError> {
        let mut store = self.records.write().await;
        store.remove(name);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ManagedRecord>, StateError> {
        let store = self.records.read().await;
        Ok(store.values().cloned().collect())
    }
}

/// On-disk layout of the state file.
#[derive(Debug, Serialize, Deserialize)]
struct StateDocument {
    schema_version: u32,
    #[serde(default)]
    records: BTreeMap<String, ManagedRecord>,
}

impl Default for StateDocument {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            records: BTreeMap::new(),
        }
    }
}

/// Single JSON file state store.
///
/// ```text
/// {
///   "schema_version": 1,
///   "records": { "<job name>": { ...ManagedRecord } }
/// }
/// ```
///
/// Every write rewrites the whole file through a sibling temp file and a
/// rename, so a crash never leaves a half-written state file behind.
pub struct FileStateStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStateStore {
    /// Open a state file. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<StateDocument, StateError> {
        if !fs::try_exists(&self.path).await? {
            return Ok(StateDocument::default());
        }

        let content = fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            return Ok(StateDocument::default());
        }

        let document: StateDocument = serde_json::from_str(&content).map_err(|e| {
            StateError::Serialization(format!("Failed to deserialize state file: {}", e))
        })?;

        if document.schema_version != SCHEMA_VERSION {
            return Err(StateError::SchemaVersion {
                found: document.schema_version,
                expected: SCHEMA_VERSION,
            });
        }

        Ok(document)
    }

    async fn write_document(&self, document: &StateDocument) -> Result<(), StateError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let content = serde_json::to_string_pretty(document).map_err(|e| {
            StateError::Serialization(format!("Failed to serialize state file: {}", e))
        })?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, content).await?;
        fs::rename(&tmp, &self.path).await?;

        debug!(
            "Saved {} record(s) to {:?}",
            document.records.len(),
            self.path
        );
        Ok(())
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn get(&self, name: &str) -> Result<Option<ManagedRecord>, StateError> {
        let _guard = self.lock.lock().await;
        let document = self.read_document().await?;
        Ok(document.records.get(name).cloned())
    }

    async fn put(&self, record: &ManagedRecord) -> Result<(), StateError> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await?;
        document.records.insert(record.name.clone(), record.clone());
        self.write_document(&document).await
    }

    async fn remove(&self, name: &str) -> Result<(), StateError> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await?;
        if document.records.remove(name).is_some() {
            self.write_document(&document).await?;
            debug!("Removed record '{}'", name);
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ManagedRecord>, StateError> {
        let _guard = self.lock.lock().await;
        let document = self.read_document().await?;
        Ok(document.records.into_values().collect())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
