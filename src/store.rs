//! Persistence of finalized generation results.
//!
//! Only completed sessions can be stored: the store accepts a
//! [`SessionResult`], which exists only after a clean finalize.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::warn;
use uuid::Uuid;

use crate::error::HookstreamResult;
use crate::session::SessionResult;

/// A stored result with its storage metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredGeneration {
    pub id: Uuid,
    pub saved_at: DateTime<Utc>,
    pub result: SessionResult,
}

impl StoredGeneration {
    fn new(result: SessionResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            saved_at: Utc::now(),
            result,
        }
    }
}

#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Store a finalized result and return its new id.
    async fn save(&self, result: &SessionResult) -> HookstreamResult<Uuid>;

    /// Load a stored result, `Ok(None)` if the id is unknown.
    async fn load(&self, id: Uuid) -> HookstreamResult<Option<StoredGeneration>>;

    /// All stored results, oldest first. Unreadable entries are skipped.
    async fn list(&self) -> HookstreamResult<Vec<StoredGeneration>>;
}

/// In-process store, mainly for tests and short-lived tools.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<Uuid, StoredGeneration>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResultStore for MemoryStore {
    async fn save(&self, result: &SessionResult) -> HookstreamResult<Uuid> {
        let stored = StoredGeneration::new(result.clone());
        let id = stored.id;
        self.entries.write().await.insert(id, stored);
        Ok(id)
    }

    async fn load(&self, id: Uuid) -> HookstreamResult<Option<StoredGeneration>> {
        Ok(self.entries.read().await.get(&id).cloned())
    }

    async fn list(&self) -> HookstreamResult<Vec<StoredGeneration>> {
        let mut all: Vec<_> = self.entries.read().await.values().cloned().collect();
        all.sort_by_key(|s| s.saved_at);
        Ok(all)
    }
}

/// One pretty-printed JSON file per result, named `<id>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Store rooted at `dir`; the directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }
}

#[async_trait]
impl ResultStore for JsonFileStore {
    async fn save(&self, result: &SessionResult) -> HookstreamResult<Uuid> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let stored = StoredGeneration::new(result.clone());
        let json = serde_json::to_string_pretty(&stored)?;
        tokio::fs::write(self.path_for(stored.id), json).await?;
        Ok(stored.id)
    }

    async fn load(&self, id: Uuid) -> HookstreamResult<Option<StoredGeneration>> {
        let path = self.path_for(id);
        match tokio::fs::read_to_string(&path).await {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> HookstreamResult<Vec<StoredGeneration>> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut all = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let json = tokio::fs::read_to_string(&path).await?;
            match serde_json::from_str::<StoredGeneration>(&json) {
                Ok(stored) => all.push(stored),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable result"),
            }
        }
        all.sort_by_key(|s| s.saved_at);
        Ok(all)
    }
}
