//! Reputation ledger rules.
//!
//! Scores start at [`BASE_SCORE`] and stay within
//! [`MIN_SCORE`]..=[`MAX_SCORE`]. Account status is recomputed from the score
//! on every change; history is prepended and never pruned.

use bandhan_common::IdGenerator;
use bandhan_db::entities::{
    AccountStatus, Party, ReputationChangeType, ReputationEvent, UserReputation,
};
use chrono::{DateTime, Utc};

/// Score of a user with no history.
pub const BASE_SCORE: i32 = 100;
/// Lowest possible score.
pub const MIN_SCORE: i32 = 0;
/// Highest possible score.
pub const MAX_SCORE: i32 = 200;
/// Scores below this suspend the account.
pub const SUSPENSION_THRESHOLD: i32 = 20;
/// Scores below this put the account under review.
pub const REVIEW_THRESHOLD: i32 = 50;

/// Input for a reputation change.
#[derive(Debug, Clone)]
pub struct ReputationUpdate {
    pub user_id: String,
    pub user_type: Party,
    pub change_type: ReputationChangeType,
    /// Signed delta. Not validated.
    pub change_value: i32,
    pub reason: String,
    pub order_id: Option<String>,
    /// Counts as a dispute occurrence when present.
    pub dispute_id: Option<String>,
}

/// Clamp `score` into the allowed range.
#[must_use]
pub fn clamp_score(score: i64) -> i32 {
    score.clamp(i64::from(MIN_SCORE), i64::from(MAX_SCORE)) as i32
}

/// Account status for `score`.
#[must_use]
pub const fn account_status_for(score: i32) -> AccountStatus {
    if score < SUSPENSION_THRESHOLD {
        AccountStatus::Suspended
    } else if score < REVIEW_THRESHOLD {
        AccountStatus::UnderReview
    } else {
        AccountStatus::Active
    }
}

/// Apply `update` to `existing`, or to a fresh record when the user has none.
#[must_use]
pub fn apply_update(
    existing: Option<UserReputation>,
    update: ReputationUpdate,
    id_gen: &IdGenerator,
    now: DateTime<Utc>,
) -> UserReputation {
    let mut reputation = existing.unwrap_or_else(|| UserReputation {
        user_id: update.user_id.clone(),
        user_type: update.user_type,
        reputation_score: BASE_SCORE,
        total_orders: 0,
        dispute_count: 0,
        successful_orders: 0,
        account_status: AccountStatus::Active,
        last_dispute_date: None,
        reputation_history: Vec::new(),
        created_at: now,
        updated_at: now,
    });

    let previous_score = reputation.reputation_score;
    let new_score = clamp_score(i64::from(previous_score) + i64::from(update.change_value));

    reputation.reputation_score = new_score;
    reputation.account_status = account_status_for(new_score);
    reputation.updated_at = now;

    if update.dispute_id.is_some() {
        reputation.dispute_count += 1;
        reputation.last_dispute_date = Some(now);
    }
    match update.change_type {
        ReputationChangeType::OrderCompleted => {
            reputation.total_orders += 1;
            reputation.successful_orders += 1;
        }
        ReputationChangeType::OrderFailed => reputation.total_orders += 1,
        _ => {}
    }

    reputation.reputation_history.insert(
        0,
        ReputationEvent {
            id: id_gen.generate(),
            change_type: update.change_type,
            change_value: update.change_value,
            previous_score,
            new_score,
            reason: update.reason,
            order_id: update.order_id,
            dispute_id: update.dispute_id,
            created_at: now,
        },
    );

    reputation
}
