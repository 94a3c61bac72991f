//! Key-value storage abstraction for persisted collections.
//!
//! Every collection is stored whole under a single string key, so backends
//! only need blob reads and writes. Supports process memory, the local
//! filesystem and Redis (see [`crate::redis_store`]).

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::config::{StorageBackendKind, StorageConfig};
use crate::redis_store::RedisStore;
use crate::{AppError, AppResult};

/// Storage backend trait.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get_item(&self, key: &str) -> AppResult<Option<String>>;

    /// Replace the value stored under `key`.
    async fn set_item(&self, key: &str, value: &str) -> AppResult<()>;
}

/// In-memory storage backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        self.items
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Local filesystem storage backend, one file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Create a new file storage backend rooted at `base_path`.
    #[must_use]
    pub const fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Map a storage key to a file path.
    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base_path.join(format!("{name}.json"))
    }
}

#[async_trait::async_trait]
impl KeyValueStore for FileStore {
    async fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(key = %key, "No stored value");
                Ok(None)
            }
            Err(e) => Err(AppError::Storage(format!(
                "Failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to create directory: {e}")))?;

        // Write to a sibling file and rename so readers never see a torn value.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write file: {e}")))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to replace file: {e}")))?;

        debug!(key = %key, bytes = value.len(), "Stored value");
        Ok(())
    }
}

/// Open the backend selected by `config`.
pub async fn open(config: &StorageConfig) -> AppResult<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match config.backend {
        StorageBackendKind::Memory => Arc::new(MemoryStore::new()),
        StorageBackendKind::File => Arc::new(FileStore::new(config.path.clone())),
        StorageBackendKind::Redis => Arc::new(RedisStore::connect(&config.redis_url).await?),
    };
    debug!(backend = ?config.backend, "Opened key-value storage");
    Ok(store)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get_item("disputes").await.unwrap(), None);

        store.set_item("disputes", "[]").await.unwrap();
        store.set_item("disputes", "[1]").await.unwrap();

        assert_eq!(
            store.get_item("disputes").await.unwrap().as_deref(),
            Some("[1]")
        );
    }

    #[tokio::test]
    async fn test_open_memory_backend() {
        let config = StorageConfig {
            backend: StorageBackendKind::Memory,
            ..StorageConfig::default()
        };
        let store = open(&config).await.unwrap();
        store.set_item("k", "v").await.unwrap();
        assert_eq!(store.get_item("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_file_store_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));

        assert_eq!(store.get_item("bandhan:disputes").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());
        store
            .set_item("bandhan:disputes", r#"[{"id":"a"}]"#)
            .await
            .unwrap();

        let reopened = FileStore::new(dir.path().to_path_buf());
        assert_eq!(
            reopened.get_item("bandhan:disputes").await.unwrap().as_deref(),
            Some(r#"[{"id":"a"}]"#)
        );
        assert!(dir.path().join("bandhan_disputes.json").exists());
    }
}
