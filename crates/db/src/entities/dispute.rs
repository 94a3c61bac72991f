//! Dispute entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AiDisputeAnalysis, Evidence, EvidenceType, Party};

/// Dispute workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DisputeStatus {
    #[default]
    Open,
    AiAnalyzing,
    UnderReview,
    Resolved,
    /// Stored value only; nothing in the engine moves a dispute here.
    Escalated,
    /// Stored value only; nothing in the engine moves a dispute here.
    Closed,
}

/// How urgently a dispute needs attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DisputePriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

/// Administrative outcome recorded on a resolved dispute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionType {
    Refund,
    PartialRefund,
    Release,
    NoAction,
}

/// Who resolved a dispute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedBy {
    Ai,
    #[default]
    Moderator,
    Admin,
}

/// Dispute model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dispute {
    /// Opaque local identifier.
    pub id: String,
    /// Human-readable sequence ID, e.g. `BND-DISP-MH-2026-001`.
    pub dispute_id: String,
    /// The order under dispute.
    pub order_id: String,
    pub raised_by: Party,
    pub reason: String,
    pub status: DisputeStatus,
    pub priority: DisputePriority,
    /// Evidence in submission order.
    #[serde(default)]
    pub evidence: Vec<Evidence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<AiDisputeAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_type: Option<ResolutionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_by: Option<ResolvedBy>,
    /// Set exactly when `status` is `Resolved`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Dispute {
    /// Whether `key` names this dispute, by opaque or human-readable ID.
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        self.id == key || self.dispute_id == key
    }

    /// Whether the dispute has reached `Resolved`.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.status == DisputeStatus::Resolved
    }

    /// Number of evidence items of `evidence_type`.
    #[must_use]
    pub fn evidence_count(&self, evidence_type: EvidenceType) -> usize {
        self.evidence
            .iter()
            .filter(|e| e.evidence_type == evidence_type)
            .count()
    }

    /// Number of evidence items submitted by `party`.
    #[must_use]
    pub fn evidence_from(&self, party: Party) -> usize {
        self.evidence
            .iter()
            .filter(|e| e.submitted_by == party)
            .count()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_dispute_wire_format() {
        let json = r#"{
            "id": "01j0000000000000000000000a",
            "disputeId": "BND-DISP-MH-2026-001",
            "orderId": "ORD-1",
            "raisedBy": "buyer",
            "reason": "Item not delivered",
            "status": "under_review",
            "priority": "high",
            "createdAt": "2026-01-05T09:00:00Z",
            "updatedAt": "2026-01-05T10:00:00.123Z"
        }"#;

        let dispute: Dispute = serde_json::from_str(json).unwrap();
        assert_eq!(dispute.status, DisputeStatus::UnderReview);
        assert_eq!(dispute.priority, DisputePriority::High);
        assert!(dispute.evidence.is_empty());
        assert!(dispute.resolved_at.is_none());
        assert!(!dispute.matches("ORD-1"));
        assert!(dispute.matches("BND-DISP-MH-2026-001"));

        let value = serde_json::to_value(&dispute).unwrap();
        assert_eq!(value["status"], "under_review");
        assert_eq!(value["raisedBy"], "buyer");
        assert!(value.get("resolvedAt").is_none());
    }

    #[test]
    fn test_unreachable_statuses_deserialize() {
        let status: DisputeStatus = serde_json::from_str("\"escalated\"").unwrap();
        assert_eq!(status, DisputeStatus::Escalated);
        let status: DisputeStatus = serde_json::from_str("\"closed\"").unwrap();
        assert_eq!(status, DisputeStatus::Closed);
    }
}
