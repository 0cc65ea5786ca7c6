//! Draft store implementations.

use async_trait::async_trait;
use scenecraft_core::TopicDraft;
use scenecraft_error::{JsonError, ScenecraftResult, StorageError, StorageErrorKind};
use scenecraft_interface::DraftStore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// Draft store held in memory.
#[derive(Debug, Default)]
pub struct InMemoryDraftStore {
    entries: RwLock<HashMap<String, TopicDraft>>,
}

impl InMemoryDraftStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DraftStore for InMemoryDraftStore {
    async fn get(&self, key: &str) -> ScenecraftResult<Option<TopicDraft>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, draft: &TopicDraft) -> ScenecraftResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), draft.clone());
        Ok(())
    }

    async fn list(&self) -> ScenecraftResult<Vec<(String, TopicDraft)>> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    async fn delete(&self, key: &str) -> ScenecraftResult<bool> {
        Ok(self.entries.write().await.remove(key).is_some())
    }
}

/// On-disk entry: the key is stored with the draft because file names are
/// derived from it one-way.
#[derive(Debug, Serialize, Deserialize)]
struct StoredEntry {
    key: String,
    draft: TopicDraft,
}

/// Draft store with one JSON file per key.
///
/// File names are `{readable-prefix}-{hash}.json`, where the hash is the
/// first 16 hex digits of the key's SHA-256. Writes go to a temp file and
/// are renamed into place.
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct FileDraftStore {
    /// Directory holding the entries
    dir: PathBuf,
}

impl FileDraftStore {
    /// Open (and create if needed) a store directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    #[instrument(skip(dir))]
    pub fn new(dir: impl Into<PathBuf>) -> ScenecraftResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                dir.display(),
                e
            )))
        })?;
        info!(path = %dir.display(), "Opened draft store");
        Ok(Self { dir })
    }

    /// File path for a key.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let digest = format!("{:x}", Sha256::digest(key.as_bytes()));
        let prefix: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .take(40)
            .collect();
        self.dir.join(format!("{}-{}.json", prefix, &digest[..16]))
    }

    async fn read_entry(path: &Path) -> ScenecraftResult<Option<StoredEntry>> {
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
                .into());
            }
        };
        let entry = serde_json::from_str::<StoredEntry>(&contents).map_err(|e| {
            StorageError::new(StorageErrorKind::Corrupt {
                key: path.display().to_string(),
                message: e.to_string(),
            })
        })?;
        Ok(Some(entry))
    }
}

#[async_trait]
impl DraftStore for FileDraftStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> ScenecraftResult<Option<TopicDraft>> {
        let entry = Self::read_entry(&self.path_for(key)).await?;
        Ok(entry.filter(|e| e.key == key).map(|e| e.draft))
    }

    #[instrument(skip(self, draft))]
    async fn set(&self, key: &str, draft: &TopicDraft) -> ScenecraftResult<()> {
        let path = self.path_for(key);
        let entry = StoredEntry {
            key: key.to_string(),
            draft: draft.clone(),
        };
        let contents = serde_json::to_string_pretty(&entry)
            .map_err(|e| JsonError::new(format!("Failed to serialize draft: {}", e)))?;

        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, contents).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;
        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        debug!(path = %path.display(), "Stored draft");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self) -> ScenecraftResult<Vec<(String, TopicDraft)>> {
        let mut dir = tokio::fs::read_dir(&self.dir).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                self.dir.display(),
                e
            )))
        })?;

        let mut entries = Vec::new();
        loop {
            let next = dir.next_entry().await.map_err(|e| {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    self.dir.display(),
                    e
                )))
            })?;
            let Some(file) = next else { break };
            let path = file.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match Self::read_entry(&path).await {
                Ok(Some(entry)) => entries.push((entry.key, entry.draft)),
                Ok(None) => {}
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable draft"),
            }
        }

        debug!(count = entries.len(), "Listed drafts");
        Ok(entries)
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> ScenecraftResult<bool> {
        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!(path = %path.display(), "Deleted draft");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::new(StorageErrorKind::FileRemove(format!(
                "{}: {}",
                path.display(),
                e
            )))
            .into()),
        }
    }
}
