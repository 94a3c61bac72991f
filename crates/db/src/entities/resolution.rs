//! Dispute settlement entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How funds were split when a dispute settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementType {
    FullRefund,
    PartialRefund,
    ReleaseFunds,
    SplitSettlement,
}

/// Financial settlement record for a dispute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisputeResolution {
    pub id: String,
    /// Opaque ID of the settled dispute.
    pub dispute_id: String,
    pub order_id: String,
    pub resolution_type: SettlementType,
    pub buyer_refund: f64,
    pub seller_release: f64,
    pub platform_fee: f64,
    pub logistics_fee: f64,
    pub reasoning: String,
    /// Moderator or system that validated the split.
    pub validated_by: String,
    /// Payment-provider transaction references.
    #[serde(default)]
    pub transaction_ids: Vec<String>,
    pub completed_at: DateTime<Utc>,
}

impl DisputeResolution {
    /// Sum of every amount moved by this settlement.
    #[must_use]
    pub fn total_amount(&self) -> f64 {
        self.buyer_refund + self.seller_release + self.platform_fee + self.logistics_fee
    }
}
