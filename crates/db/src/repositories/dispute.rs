//! Dispute repository.

use std::sync::Arc;

use bandhan_common::{AppError, AppResult, KeyValueStore, get_metrics};
use tracing::debug;

use super::collection::JsonCollection;
use crate::entities::Dispute;

/// Persists the dispute collection and the dispute ID sequence.
#[derive(Clone)]
pub struct DisputeRepository {
    disputes: JsonCollection<Dispute>,
    store: Arc<dyn KeyValueStore>,
    sequence_key: String,
}

impl DisputeRepository {
    /// Create a new dispute repository.
    #[must_use]
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        disputes_key: impl Into<String>,
        sequence_key: impl Into<String>,
    ) -> Self {
        Self {
            disputes: JsonCollection::new(Arc::clone(&store), disputes_key),
            store,
            sequence_key: sequence_key.into(),
        }
    }

    /// Load every stored dispute.
    pub async fn load(&self) -> AppResult<Vec<Dispute>> {
        self.disputes.load().await
    }

    /// Replace the stored disputes.
    pub async fn save(&self, disputes: &[Dispute]) -> AppResult<()> {
        self.disputes.save(disputes).await
    }

    /// Load the last issued dispute sequence number, if one was stored.
    pub async fn load_sequence(&self) -> AppResult<Option<u64>> {
        let Some(raw) = self.store.get_item(&self.sequence_key).await? else {
            return Ok(None);
        };
        raw.trim().parse().map(Some).map_err(|e| {
            AppError::Serialization(format!("Malformed dispute sequence {raw:?}: {e}"))
        })
    }

    /// Store the last issued dispute sequence number.
    pub async fn save_sequence(&self, sequence: u64) -> AppResult<()> {
        let result = self
            .store
            .set_item(&self.sequence_key, &sequence.to_string())
            .await;
        get_metrics().record_storage_write(result.is_err());
        result?;
        debug!(sequence, "Stored dispute sequence");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bandhan_common::MemoryStore;

    #[tokio::test]
    async fn test_sequence_roundtrip() {
        let store = Arc::new(MemoryStore::new());
        let repo = DisputeRepository::new(store, "disputes", "dispute_sequence");

        assert_eq!(repo.load_sequence().await.unwrap(), None);
        repo.save_sequence(12).await.unwrap();
        assert_eq!(repo.load_sequence().await.unwrap(), Some(12));
    }

    struct ReadOnlyStore;

    #[async_trait::async_trait]
    impl KeyValueStore for ReadOnlyStore {
        async fn get_item(&self, _key: &str) -> AppResult<Option<String>> {
            Ok(None)
        }

        async fn set_item(&self, _key: &str, _value: &str) -> AppResult<()> {
            Err(AppError::Storage("read-only".to_string()))
        }
    }

    #[tokio::test]
    async fn test_sequence_write_counted() {
        use std::sync::atomic::Ordering;

        let metrics = get_metrics();
        let writes = metrics.storage_writes.load(Ordering::Relaxed);
        let errors = metrics.storage_errors.load(Ordering::Relaxed);

        let repo = DisputeRepository::new(Arc::new(ReadOnlyStore), "disputes", "dispute_sequence");
        assert!(repo.save_sequence(4).await.is_err());

        assert!(metrics.storage_writes.load(Ordering::Relaxed) > writes);
        assert!(metrics.storage_errors.load(Ordering::Relaxed) > errors);
    }

    #[tokio::test]
    async fn test_malformed_sequence() {
        let store = Arc::new(MemoryStore::new());
        store.set_item("dispute_sequence", "twelve").await.unwrap();

        let repo = DisputeRepository::new(store, "disputes", "dispute_sequence");
        assert!(repo.load_sequence().await.is_err());
    }
}
