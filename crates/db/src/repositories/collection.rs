//! A whole collection stored as one JSON array under a single key.

use std::marker::PhantomData;
use std::sync::Arc;

use bandhan_common::{AppError, AppResult, KeyValueStore, get_metrics};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Typed JSON array persisted under one storage key.
pub struct JsonCollection<T> {
    store: Arc<dyn KeyValueStore>,
    key: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for JsonCollection<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            key: self.key.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> JsonCollection<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Create a collection stored under `key`.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            _marker: PhantomData,
        }
    }

    /// Read the whole collection. A missing key is an empty collection.
    pub async fn load(&self) -> AppResult<Vec<T>> {
        let Some(raw) = self.store.get_item(&self.key).await? else {
            debug!(key = %self.key, "Collection not stored yet");
            return Ok(Vec::new());
        };

        let items: Vec<T> = serde_json::from_str(&raw).map_err(|e| {
            AppError::Serialization(format!("Malformed collection {}: {e}", self.key))
        })?;

        debug!(key = %self.key, count = items.len(), "Loaded collection");
        Ok(items)
    }

    /// Replace the whole stored collection with `items`.
    pub async fn save(&self, items: &[T]) -> AppResult<()> {
        let raw = serde_json::to_string(items)?;
        let result = self.store.set_item(&self.key, &raw).await;
        get_metrics().record_storage_write(result.is_err());
        result
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bandhan_common::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Item {
        name: String,
    }

    #[tokio::test]
    async fn test_missing_key_is_empty() {
        let collection: JsonCollection<Item> =
            JsonCollection::new(Arc::new(MemoryStore::new()), "items");
        assert!(collection.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_replaces_collection() {
        let store = Arc::new(MemoryStore::new());
        let collection: JsonCollection<Item> = JsonCollection::new(store.clone(), "items");

        collection
            .save(&[Item { name: "a".to_string() }, Item { name: "b".to_string() }])
            .await
            .unwrap();
        collection
            .save(&[Item { name: "c".to_string() }])
            .await
            .unwrap();

        let loaded = collection.load().await.unwrap();
        assert_eq!(loaded, vec![Item { name: "c".to_string() }]);
        assert_eq!(
            store.get_item("items").await.unwrap().as_deref(),
            Some(r#"[{"name":"c"}]"#)
        );
    }

    #[tokio::test]
    async fn test_malformed_collection_is_error() {
        let store = Arc::new(MemoryStore::new());
        store.set_item("items", "{not json").await.unwrap();

        let collection: JsonCollection<Item> = JsonCollection::new(store, "items");
        let err = collection.load().await.unwrap_err();
        assert!(matches!(err, AppError::Serialization(_)));
    }
}
