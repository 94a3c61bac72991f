//! Rule-based dispute analysis.
//!
//! [`evaluate`] is the decision policy: a pure function of the dispute's
//! reason text and evidence. [`RuleBasedAnalyzer`] wraps it with a simulated
//! inference latency and stamps the result as an [`AiDisputeAnalysis`].
//!
//! Rules are checked in order and the first match wins:
//!
//! | # | condition                                               | recommendation   | confidence |
//! |---|---------------------------------------------------------|------------------|------------|
//! | 1 | reason mentions "not delivered" and no GPS log          | `full_refund`    | 0.95       |
//! | 2 | reason mentions "quality" and at least 2 photos         | `partial_refund` | 0.82       |
//! | 3 | at least 2 seller submissions and at least 1 GPS log    | `release_funds`  | 0.88       |
//! | 4 | anything else                                           | `escalate_human` | 0.45       |

use std::time::{Duration, Instant};

use async_trait::async_trait;
use bandhan_common::AppResult;
use bandhan_common::config::AnalysisConfig;
use bandhan_db::entities::{
    AiDisputeAnalysis, AiRecommendation, Dispute, EvidenceTally, EvidenceType, Party,
};
use rand::Rng;
use tracing::debug;

const NON_DELIVERY_REASONING: &str = "Buyer reports the order was not delivered and no GPS log \
     was submitted to show it reached the delivery point. Refunding the buyer in full.";
const QUALITY_REASONING: &str = "Photos support the quality complaint while the goods were \
     delivered. A partial refund splits the loss between buyer and seller.";
const DELIVERY_PROVEN_REASONING: &str = "Seller submitted supporting evidence and a GPS log \
     confirms delivery. Releasing funds to the seller.";
const INCONCLUSIVE_REASONING: &str = "Evidence does not match a known resolution pattern. \
     A moderator needs to review this dispute.";

/// Outcome of the decision policy, before it is stamped as an analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    pub recommendation: AiRecommendation,
    pub confidence: f64,
    pub reasoning: &'static str,
}

/// Apply the decision policy to `dispute`.
#[must_use]
pub fn evaluate(dispute: &Dispute) -> Verdict {
    let reason = dispute.reason.to_lowercase();
    let gps_logs = dispute.evidence_count(EvidenceType::GpsLog);
    let photos = dispute.evidence_count(EvidenceType::Photo);
    let seller_items = dispute.evidence_from(Party::Seller);

    if reason.contains("not delivered") && gps_logs == 0 {
        Verdict {
            recommendation: AiRecommendation::FullRefund,
            confidence: 0.95,
            reasoning: NON_DELIVERY_REASONING,
        }
    } else if reason.contains("quality") && photos >= 2 {
        Verdict {
            recommendation: AiRecommendation::PartialRefund,
            confidence: 0.82,
            reasoning: QUALITY_REASONING,
        }
    } else if seller_items >= 2 && gps_logs >= 1 {
        Verdict {
            recommendation: AiRecommendation::ReleaseFunds,
            confidence: 0.88,
            reasoning: DELIVERY_PROVEN_REASONING,
        }
    } else {
        Verdict {
            recommendation: AiRecommendation::EscalateHuman,
            confidence: 0.45,
            reasoning: INCONCLUSIVE_REASONING,
        }
    }
}

/// Produces an analysis for a dispute.
///
/// The store calls this outside its command loop, so slow engines do not
/// block other mutations.
#[async_trait]
pub trait AnalysisEngine: Send + Sync {
    /// Analyze `dispute` as it stood when analysis began.
    async fn analyze(&self, dispute: &Dispute) -> AppResult<AiDisputeAnalysis>;
}

/// The built-in engine: [`evaluate`] behind a random delay.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedAnalyzer {
    config: AnalysisConfig,
}

impl RuleBasedAnalyzer {
    /// Create an analyzer with the given latency range and model tag.
    #[must_use]
    pub const fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Pick a latency within the configured range.
    fn latency(&self) -> Duration {
        let low = self.config.min_delay_ms.min(self.config.max_delay_ms);
        let high = self.config.min_delay_ms.max(self.config.max_delay_ms);
        if high == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(low..=high))
    }
}

#[async_trait]
impl AnalysisEngine for RuleBasedAnalyzer {
    async fn analyze(&self, dispute: &Dispute) -> AppResult<AiDisputeAnalysis> {
        let started = Instant::now();
        let delay = self.latency();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let verdict = evaluate(dispute);
        let processing_time_ms = started.elapsed().as_millis() as u64;

        debug!(
            dispute_id = %dispute.dispute_id,
            recommendation = ?verdict.recommendation,
            confidence = verdict.confidence,
            processing_time_ms,
            "Analysis finished"
        );

        Ok(AiDisputeAnalysis {
            dispute_id: dispute.id.clone(),
            ai_recommendation: verdict.recommendation,
            confidence_score: verdict.confidence,
            reasoning: verdict.reasoning.to_string(),
            evidence_analyzed: EvidenceTally::from_evidence(&dispute.evidence),
            processing_time_ms,
            model_version: self.config.model_version.clone(),
            created_at: chrono::Utc::now(),
        })
    }
}
