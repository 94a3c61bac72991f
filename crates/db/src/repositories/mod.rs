//! Repositories over the key-value store.

pub mod collection;
pub mod dispute;
pub mod reputation;
pub mod resolution;

pub use collection::JsonCollection;
pub use dispute::DisputeRepository;
pub use reputation::ReputationRepository;
pub use resolution::ResolutionRepository;

/// Key of the dispute collection.
pub const DISPUTES_KEY: &str = "disputes";
/// Key of the reputation collection.
pub const REPUTATIONS_KEY: &str = "user_reputations";
/// Key of the settlement collection.
pub const RESOLUTIONS_KEY: &str = "dispute_resolutions";
/// Key of the last issued dispute sequence number.
pub const SEQUENCE_KEY: &str = "dispute_sequence";

/// Build the full storage key for `name` under `prefix`.
#[must_use]
pub fn storage_key(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}:{name}")
    }
}
