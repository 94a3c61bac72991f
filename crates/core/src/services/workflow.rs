//! Dispute state machine.
//!
//! ```text
//! open ──trigger──▶ ai_analyzing ──confidence ≥ threshold──▶ resolved
//!                        │
//!                        ├──confidence < threshold──▶ under_review
//!                        └──analyzer failed─────────▶ under_review
//! any ──moderator resolve──▶ resolved
//! ```
//!
//! Every transition refreshes `updated_at`, and `resolved_at` is kept in
//! step with the `Resolved` status.

use bandhan_db::entities::{
    AiDisputeAnalysis, AiRecommendation, Dispute, DisputeStatus, Evidence, ResolutionType,
    ResolvedBy,
};
use chrono::{DateTime, Utc};

/// Whether analysis may start on a dispute in its current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisGate {
    /// Analysis may start.
    Ready,
    /// An analysis is already recorded.
    AlreadyAnalyzed,
    /// An analysis is running.
    InProgress,
    /// The dispute is past the point where analysis applies.
    Finished,
}

/// Resolution recorded when an analysis resolves a dispute on its own.
#[must_use]
pub const fn resolution_for(recommendation: AiRecommendation) -> Option<ResolutionType> {
    match recommendation {
        AiRecommendation::FullRefund => Some(ResolutionType::Refund),
        AiRecommendation::PartialRefund => Some(ResolutionType::PartialRefund),
        AiRecommendation::ReleaseFunds => Some(ResolutionType::Release),
        AiRecommendation::EscalateHuman => None,
    }
}

/// Check whether analysis may start on `dispute`.
#[must_use]
pub fn analysis_gate(dispute: &Dispute) -> AnalysisGate {
    if dispute.ai_analysis.is_some() {
        return AnalysisGate::AlreadyAnalyzed;
    }
    match dispute.status {
        DisputeStatus::Open | DisputeStatus::UnderReview => AnalysisGate::Ready,
        DisputeStatus::AiAnalyzing => AnalysisGate::InProgress,
        DisputeStatus::Resolved | DisputeStatus::Escalated | DisputeStatus::Closed => {
            AnalysisGate::Finished
        }
    }
}

/// Append `evidence` in submission order.
pub fn add_evidence(dispute: &mut Dispute, evidence: Evidence, now: DateTime<Utc>) {
    dispute.evidence.push(evidence);
    dispute.updated_at = now;
}

/// Move a dispute into `ai_analyzing`. Callers check [`analysis_gate`] first.
pub fn begin_analysis(dispute: &mut Dispute, now: DateTime<Utc>) {
    dispute.status = DisputeStatus::AiAnalyzing;
    dispute.updated_at = now;
}

/// Record a finished analysis and route the dispute by its confidence.
///
/// Returns `true` when the dispute was resolved by the analysis. If the
/// dispute left `ai_analyzing` meanwhile (a moderator resolved it), the
/// analysis is kept for audit but the status is left alone.
pub fn complete_analysis(
    dispute: &mut Dispute,
    analysis: AiDisputeAnalysis,
    auto_resolve_threshold: f64,
    now: DateTime<Utc>,
) -> bool {
    if dispute.ai_analysis.is_some() {
        return false;
    }

    let recommendation = analysis.ai_recommendation;
    let confident = analysis.confidence_score >= auto_resolve_threshold;
    dispute.ai_analysis = Some(analysis);
    dispute.updated_at = now;

    if dispute.status != DisputeStatus::AiAnalyzing {
        return false;
    }

    if confident {
        dispute.status = DisputeStatus::Resolved;
        dispute.resolved_by = Some(ResolvedBy::Ai);
        dispute.resolved_at = Some(now);
        dispute.resolution_type = resolution_for(recommendation);
        true
    } else {
        dispute.status = DisputeStatus::UnderReview;
        false
    }
}

/// Hand a dispute whose analysis failed to human review.
pub fn fail_analysis(dispute: &mut Dispute, now: DateTime<Utc>) {
    if dispute.status == DisputeStatus::AiAnalyzing {
        dispute.status = DisputeStatus::UnderReview;
        dispute.updated_at = now;
    }
}

/// Force a dispute into `resolved`, whatever its current status.
pub fn resolve(
    dispute: &mut Dispute,
    resolution_type: ResolutionType,
    resolution_details: String,
    resolved_by: ResolvedBy,
    now: DateTime<Utc>,
) {
    dispute.status = DisputeStatus::Resolved;
    dispute.resolution_type = Some(resolution_type);
    dispute.resolution_details = Some(resolution_details);
    dispute.resolved_by = Some(resolved_by);
    dispute.resolved_at = Some(now);
    dispute.updated_at = now;
}

#[cfg(test)]
mod tests {
    use super::*;
    use bandhan_db::entities::{DisputePriority, EvidenceTally, Party};

    fn open_dispute() -> Dispute {
        let now = Utc::now();
        Dispute {
            id: "d1".to_string(),
            dispute_id: "BND-DISP-MH-2026-001".to_string(),
            order_id: "ORD-1".to_string(),
            raised_by: Party::Buyer,
            reason: "not delivered".to_string(),
            status: DisputeStatus::Open,
            priority: DisputePriority::Medium,
            evidence: Vec::new(),
            ai_analysis: None,
            resolution_type: None,
            resolution_details: None,
            resolved_by: None,
            resolved_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn analysis(recommendation: AiRecommendation, confidence: f64) -> AiDisputeAnalysis {
        AiDisputeAnalysis {
            dispute_id: "d1".to_string(),
            ai_recommendation: recommendation,
            confidence_score: confidence,
            reasoning: String::new(),
            evidence_analyzed: EvidenceTally::default(),
            processing_time_ms: 0,
            model_version: "test".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_confident_analysis_resolves() {
        let mut dispute = open_dispute();
        begin_analysis(&mut dispute, Utc::now());
        assert_eq!(dispute.status, DisputeStatus::AiAnalyzing);

        let resolved = complete_analysis(
            &mut dispute,
            analysis(AiRecommendation::FullRefund, 0.95),
            0.80,
            Utc::now(),
        );

        assert!(resolved);
        assert_eq!(dispute.status, DisputeStatus::Resolved);
        assert_eq!(dispute.resolved_by, Some(ResolvedBy::Ai));
        assert_eq!(dispute.resolution_type, Some(ResolutionType::Refund));
        assert!(dispute.resolved_at.is_some());
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let mut dispute = open_dispute();
        begin_analysis(&mut dispute, Utc::now());
        assert!(complete_analysis(
            &mut dispute,
            analysis(AiRecommendation::PartialRefund, 0.80),
            0.80,
            Utc::now(),
        ));
        assert_eq!(dispute.resolution_type, Some(ResolutionType::PartialRefund));
    }

    #[test]
    fn test_low_confidence_goes_to_review() {
        let mut dispute = open_dispute();
        begin_analysis(&mut dispute, Utc::now());
        let resolved = complete_analysis(
            &mut dispute,
            analysis(AiRecommendation::EscalateHuman, 0.45),
            0.80,
            Utc::now(),
        );

        assert!(!resolved);
        assert_eq!(dispute.status, DisputeStatus::UnderReview);
        assert!(dispute.ai_analysis.is_some());
        assert!(dispute.resolved_by.is_none());
        assert!(dispute.resolved_at.is_none());
    }

    #[test]
    fn test_analysis_recorded_at_most_once() {
        let mut dispute = open_dispute();
        begin_analysis(&mut dispute, Utc::now());
        complete_analysis(
            &mut dispute,
            analysis(AiRecommendation::EscalateHuman, 0.45),
            0.80,
            Utc::now(),
        );
        assert_eq!(analysis_gate(&dispute), AnalysisGate::AlreadyAnalyzed);

        complete_analysis(
            &mut dispute,
            analysis(AiRecommendation::FullRefund, 0.95),
            0.80,
            Utc::now(),
        );
        assert_eq!(
            dispute.ai_analysis.as_ref().map(|a| a.ai_recommendation),
            Some(AiRecommendation::EscalateHuman)
        );
        assert_eq!(dispute.status, DisputeStatus::UnderReview);
    }

    #[test]
    fn test_failure_rolls_back_to_review() {
        let mut dispute = open_dispute();
        begin_analysis(&mut dispute, Utc::now());
        fail_analysis(&mut dispute, Utc::now());

        assert_eq!(dispute.status, DisputeStatus::UnderReview);
        assert!(dispute.ai_analysis.is_none());
        assert_eq!(analysis_gate(&dispute), AnalysisGate::Ready);
    }

    #[test]
    fn test_manual_resolution_during_analysis_keeps_status() {
        let mut dispute = open_dispute();
        begin_analysis(&mut dispute, Utc::now());
        resolve(
            &mut dispute,
            ResolutionType::NoAction,
            "Parties settled offline".to_string(),
            ResolvedBy::Moderator,
            Utc::now(),
        );

        let resolved = complete_analysis(
            &mut dispute,
            analysis(AiRecommendation::FullRefund, 0.95),
            0.80,
            Utc::now(),
        );

        assert!(!resolved);
        assert_eq!(dispute.resolved_by, Some(ResolvedBy::Moderator));
        assert_eq!(dispute.resolution_type, Some(ResolutionType::NoAction));
        assert!(dispute.ai_analysis.is_some());
    }

    #[test]
    fn test_gate_blocks_finished_disputes() {
        let mut dispute = open_dispute();
        assert_eq!(analysis_gate(&dispute), AnalysisGate::Ready);

        dispute.status = DisputeStatus::AiAnalyzing;
        assert_eq!(analysis_gate(&dispute), AnalysisGate::InProgress);

        dispute.status = DisputeStatus::Closed;
        assert_eq!(analysis_gate(&dispute), AnalysisGate::Finished);
    }

    #[test]
    fn test_escalate_recommendation_has_no_resolution() {
        assert_eq!(resolution_for(AiRecommendation::EscalateHuman), None);
        assert_eq!(
            resolution_for(AiRecommendation::ReleaseFunds),
            Some(ResolutionType::Release)
        );
    }
}
