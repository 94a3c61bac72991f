//! Settlement records for resolved disputes.

use bandhan_common::{AppResult, IdGenerator};
use bandhan_db::entities::{Dispute, DisputeResolution, SettlementType};
use chrono::{DateTime, Utc};
use validator::{Validate, ValidationError};

/// Input for recording a settlement.
#[derive(Debug, Clone, Validate)]
pub struct RecordSettlementInput {
    /// Opaque or human-readable ID of the settled dispute.
    #[validate(length(min = 1))]
    pub dispute_id: String,
    pub resolution_type: SettlementType,
    #[validate(range(min = 0.0), custom(function = "finite_amount"))]
    pub buyer_refund: f64,
    #[validate(range(min = 0.0), custom(function = "finite_amount"))]
    pub seller_release: f64,
    #[validate(range(min = 0.0), custom(function = "finite_amount"))]
    pub platform_fee: f64,
    #[validate(range(min = 0.0), custom(function = "finite_amount"))]
    pub logistics_fee: f64,
    #[validate(length(min = 1, max = 2000))]
    pub reasoning: String,
    #[validate(length(min = 1))]
    pub validated_by: String,
    pub transaction_ids: Vec<String>,
}

/// Reject NaN and infinite amounts, which cannot be stored as JSON.
#[allow(clippy::trivially_copy_pass_by_ref)]
fn finite_amount(amount: f64) -> Result<(), ValidationError> {
    if amount.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("non_finite_amount"))
    }
}

/// Validate `input` and build the record for `dispute`.
pub fn build_settlement(
    dispute: &Dispute,
    input: RecordSettlementInput,
    id_gen: &IdGenerator,
    now: DateTime<Utc>,
) -> AppResult<DisputeResolution> {
    input.validate()?;

    Ok(DisputeResolution {
        id: id_gen.generate(),
        dispute_id: dispute.id.clone(),
        order_id: dispute.order_id.clone(),
        resolution_type: input.resolution_type,
        buyer_refund: input.buyer_refund,
        seller_release: input.seller_release,
        platform_fee: input.platform_fee,
        logistics_fee: input.logistics_fee,
        reasoning: input.reasoning,
        validated_by: input.validated_by,
        transaction_ids: input.transaction_ids,
        completed_at: now,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bandhan_common::AppError;
    use bandhan_db::entities::{DisputePriority, DisputeStatus, Party};

    fn dispute() -> Dispute {
        let now = Utc::now();
        Dispute {
            id: "d1".to_string(),
            dispute_id: "BND-DISP-MH-2026-001".to_string(),
            order_id: "ORD-1".to_string(),
            raised_by: Party::Buyer,
            reason: "quality".to_string(),
            status: DisputeStatus::Resolved,
            priority: DisputePriority::Medium,
            evidence: Vec::new(),
            ai_analysis: None,
            resolution_type: None,
            resolution_details: None,
            resolved_by: None,
            resolved_at: Some(now),
            created_at: now,
            updated_at: now,
        }
    }

    fn input(buyer_refund: f64) -> RecordSettlementInput {
        RecordSettlementInput {
            dispute_id: "d1".to_string(),
            resolution_type: SettlementType::SplitSettlement,
            buyer_refund,
            seller_release: 600.0,
            platform_fee: 20.0,
            logistics_fee: 30.0,
            reasoning: "Half the crates were spoiled".to_string(),
            validated_by: "moderator-2".to_string(),
            transaction_ids: vec!["txn_1".to_string()],
        }
    }

    #[test]
    fn test_build_settlement() {
        let record = build_settlement(&dispute(), input(350.0), &IdGenerator::new(), Utc::now())
            .unwrap();

        assert_eq!(record.dispute_id, "d1");
        assert_eq!(record.order_id, "ORD-1");
        assert_eq!(record.total_amount(), 1000.0);
    }

    #[test]
    fn test_non_finite_amounts_rejected() {
        for amount in [f64::NAN, f64::INFINITY] {
            let err = build_settlement(&dispute(), input(amount), &IdGenerator::new(), Utc::now())
                .unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }

        let mut fee = input(350.0);
        fee.platform_fee = f64::NAN;
        assert!(fee.validate().is_err());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let err = build_settlement(&dispute(), input(-1.0), &IdGenerator::new(), Utc::now())
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
