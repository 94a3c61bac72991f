//! Aggregate dispute statistics.

use bandhan_db::entities::{Dispute, DisputeStatus, ResolvedBy};
use serde::Serialize;

/// Dispute counts by status plus the automatic resolution rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisputeStats {
    pub total: usize,
    pub open: usize,
    pub ai_analyzing: usize,
    pub under_review: usize,
    pub resolved: usize,
    pub escalated: usize,
    pub closed: usize,
    pub resolved_by_ai: usize,
    /// `resolved_by_ai / total`, or 0 with no disputes.
    pub ai_resolution_rate: f64,
}

impl DisputeStats {
    /// Compute statistics over `disputes`.
    #[must_use]
    pub fn from_disputes(disputes: &[Dispute]) -> Self {
        let mut stats = disputes.iter().fold(Self::default(), |mut stats, dispute| {
            stats.total += 1;
            match dispute.status {
                DisputeStatus::Open => stats.open += 1,
                DisputeStatus::AiAnalyzing => stats.ai_analyzing += 1,
                DisputeStatus::UnderReview => stats.under_review += 1,
                DisputeStatus::Resolved => stats.resolved += 1,
                DisputeStatus::Escalated => stats.escalated += 1,
                DisputeStatus::Closed => stats.closed += 1,
            }
            if dispute.is_resolved() && dispute.resolved_by == Some(ResolvedBy::Ai) {
                stats.resolved_by_ai += 1;
            }
            stats
        });

        if stats.total > 0 {
            stats.ai_resolution_rate = stats.resolved_by_ai as f64 / stats.total as f64;
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bandhan_db::entities::{DisputePriority, Party};
    use chrono::Utc;

    fn dispute(status: DisputeStatus, resolved_by: Option<ResolvedBy>) -> Dispute {
        let now = Utc::now();
        Dispute {
            id: "d".to_string(),
            dispute_id: "BND-DISP-MH-2026-001".to_string(),
            order_id: "ORD-1".to_string(),
            raised_by: Party::Buyer,
            reason: String::new(),
            status,
            priority: DisputePriority::Low,
            evidence: Vec::new(),
            ai_analysis: None,
            resolution_type: None,
            resolution_details: None,
            resolved_by,
            resolved_at: (status == DisputeStatus::Resolved).then_some(now),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_empty_stats() {
        let stats = DisputeStats::from_disputes(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.ai_resolution_rate, 0.0);
    }

    #[test]
    fn test_counts_and_rate() {
        let stats = DisputeStats::from_disputes(&[
            dispute(DisputeStatus::Open, None),
            dispute(DisputeStatus::Resolved, Some(ResolvedBy::Ai)),
            dispute(DisputeStatus::Resolved, Some(ResolvedBy::Moderator)),
            dispute(DisputeStatus::UnderReview, None),
        ]);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.resolved, 2);
        assert_eq!(stats.open, 1);
        assert_eq!(stats.under_review, 1);
        assert_eq!(stats.resolved_by_ai, 1);
        assert_eq!(stats.ai_resolution_rate, 0.25);
    }
}
