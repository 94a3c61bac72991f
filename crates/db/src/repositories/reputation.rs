//! Reputation repository.

use std::sync::Arc;

use bandhan_common::{AppResult, KeyValueStore};

use super::collection::JsonCollection;
use crate::entities::UserReputation;

/// Persists the user reputation collection.
#[derive(Clone)]
pub struct ReputationRepository {
    reputations: JsonCollection<UserReputation>,
}

impl ReputationRepository {
    /// Create a new reputation repository.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            reputations: JsonCollection::new(store, key),
        }
    }

    /// Load every stored reputation.
    pub async fn load(&self) -> AppResult<Vec<UserReputation>> {
        self.reputations.load().await
    }

    /// Replace the stored reputations.
    pub async fn save(&self, reputations: &[UserReputation]) -> AppResult<()> {
        self.reputations.save(reputations).await
    }
}
