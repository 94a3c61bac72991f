//! Persistence layer for the Bandhan dispute engine.
//!
//! Each collection lives as one JSON array in a [`KeyValueStore`], written
//! whole on every mutation.

pub mod entities;
pub mod repositories;

use std::sync::Arc;

use bandhan_common::{AppResult, KeyValueStore, get_metrics};
use entities::{Dispute, DisputeResolution, UserReputation};
use repositories::{
    DISPUTES_KEY, DisputeRepository, REPUTATIONS_KEY, RESOLUTIONS_KEY, ReputationRepository,
    ResolutionRepository, SEQUENCE_KEY, storage_key,
};
use tracing::{error, info};

/// Every repository, sharing one storage backend.
#[derive(Clone)]
pub struct Repositories {
    /// Disputes and the dispute ID sequence.
    pub disputes: DisputeRepository,
    /// User reputations.
    pub reputations: ReputationRepository,
    /// Settlement records.
    pub resolutions: ResolutionRepository,
}

/// Collections as read at startup.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub disputes: Vec<Dispute>,
    pub reputations: Vec<UserReputation>,
    pub resolutions: Vec<DisputeResolution>,
    /// Last issued dispute sequence number, if stored.
    pub sequence: Option<u64>,
}

impl Repositories {
    /// Create repositories whose keys are namespaced by `key_prefix`.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, key_prefix: &str) -> Self {
        Self {
            disputes: DisputeRepository::new(
                Arc::clone(&store),
                storage_key(key_prefix, DISPUTES_KEY),
                storage_key(key_prefix, SEQUENCE_KEY),
            ),
            reputations: ReputationRepository::new(
                Arc::clone(&store),
                storage_key(key_prefix, REPUTATIONS_KEY),
            ),
            resolutions: ResolutionRepository::new(store, storage_key(key_prefix, RESOLUTIONS_KEY)),
        }
    }

    /// Load every collection in parallel.
    ///
    /// A collection that cannot be read or parsed is logged and comes back
    /// empty; the others are unaffected. There is no retry.
    pub async fn hydrate(&self) -> Snapshot {
        let (disputes, reputations, resolutions, sequence) = tokio::join!(
            self.disputes.load(),
            self.reputations.load(),
            self.resolutions.load(),
            self.disputes.load_sequence(),
        );

        let snapshot = Snapshot {
            disputes: or_empty(disputes, "disputes"),
            reputations: or_empty(reputations, "reputations"),
            resolutions: or_empty(resolutions, "resolutions"),
            sequence: or_empty(sequence, "dispute sequence"),
        };

        info!(
            disputes = snapshot.disputes.len(),
            reputations = snapshot.reputations.len(),
            resolutions = snapshot.resolutions.len(),
            "Hydrated dispute store"
        );
        snapshot
    }
}

fn or_empty<T: Default>(result: AppResult<T>, collection: &str) -> T {
    result.unwrap_or_else(|e| {
        get_metrics().record_storage_read_error();
        error!(error = %e, collection = collection, "Failed to load collection, starting empty");
        T::default()
    })
}
