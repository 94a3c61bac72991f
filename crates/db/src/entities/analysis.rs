//! AI dispute analysis entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Evidence, EvidenceType, Party};

/// Suggested outcome produced by the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiRecommendation {
    FullRefund,
    ReleaseFunds,
    PartialRefund,
    EscalateHuman,
}

/// Evidence counts recorded for audit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceTally {
    pub total: u32,
    pub photo: u32,
    pub video: u32,
    pub document: u32,
    pub gps_log: u32,
    pub text: u32,
    pub from_buyer: u32,
    pub from_seller: u32,
    pub from_logistics: u32,
}

impl EvidenceTally {
    /// Count `evidence` by type and by submitter.
    #[must_use]
    pub fn from_evidence(evidence: &[Evidence]) -> Self {
        evidence.iter().fold(Self::default(), |mut tally, item| {
            tally.total += 1;
            match item.evidence_type {
                EvidenceType::Photo => tally.photo += 1,
                EvidenceType::Video => tally.video += 1,
                EvidenceType::Document => tally.document += 1,
                EvidenceType::GpsLog => tally.gps_log += 1,
                EvidenceType::Text => tally.text += 1,
            }
            match item.submitted_by {
                Party::Buyer => tally.from_buyer += 1,
                Party::Seller => tally.from_seller += 1,
                Party::Logistics => tally.from_logistics += 1,
            }
            tally
        })
    }

    /// Number of items of `evidence_type`.
    #[must_use]
    pub const fn of_type(&self, evidence_type: EvidenceType) -> u32 {
        match evidence_type {
            EvidenceType::Photo => self.photo,
            EvidenceType::Video => self.video,
            EvidenceType::Document => self.document,
            EvidenceType::GpsLog => self.gps_log,
            EvidenceType::Text => self.text,
        }
    }

    /// Number of items submitted by `party`.
    #[must_use]
    pub const fn from_party(&self, party: Party) -> u32 {
        match party {
            Party::Buyer => self.from_buyer,
            Party::Seller => self.from_seller,
            Party::Logistics => self.from_logistics,
        }
    }
}

/// Analysis model. Written once per dispute and never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiDisputeAnalysis {
    /// Opaque ID of the analyzed dispute.
    pub dispute_id: String,
    pub ai_recommendation: AiRecommendation,
    /// Confidence in `[0, 1]`.
    pub confidence_score: f64,
    pub reasoning: String,
    pub evidence_analyzed: EvidenceTally,
    pub processing_time_ms: u64,
    pub model_version: String,
    pub created_at: DateTime<Utc>,
}
