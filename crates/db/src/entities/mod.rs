//! Persisted entities.
//!
//! Field names serialize in camelCase and timestamps as RFC 3339 strings,
//! matching the JSON blobs already stored by the mobile client.

pub mod analysis;
pub mod dispute;
pub mod evidence;
pub mod reputation;
pub mod resolution;

use serde::{Deserialize, Serialize};

pub use analysis::{AiDisputeAnalysis, AiRecommendation, EvidenceTally};
pub use dispute::{Dispute, DisputePriority, DisputeStatus, ResolutionType, ResolvedBy};
pub use evidence::{Evidence, EvidenceMetadata, EvidenceType, GpsCoordinates};
pub use reputation::{AccountStatus, ReputationChangeType, ReputationEvent, UserReputation};
pub use resolution::{DisputeResolution, SettlementType};

/// A party to a marketplace order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Party {
    Buyer,
    Seller,
    Logistics,
}

impl Party {
    /// Stored string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buyer => "buyer",
            Self::Seller => "seller",
            Self::Logistics => "logistics",
        }
    }
}

impl std::fmt::Display for Party {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
