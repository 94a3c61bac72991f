//! Settlement repository.

use std::sync::Arc;

use bandhan_common::{AppResult, KeyValueStore};

use super::collection::JsonCollection;
use crate::entities::DisputeResolution;

/// Persists dispute settlement records.
#[derive(Clone)]
pub struct ResolutionRepository {
    resolutions: JsonCollection<DisputeResolution>,
}

impl ResolutionRepository {
    /// Create a new settlement repository.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            resolutions: JsonCollection::new(store, key),
        }
    }

    /// Load every stored settlement.
    pub async fn load(&self) -> AppResult<Vec<DisputeResolution>> {
        self.resolutions.load().await
    }

    /// Replace the stored settlements.
    pub async fn save(&self, resolutions: &[DisputeResolution]) -> AppResult<()> {
        self.resolutions.save(resolutions).await
    }
}
