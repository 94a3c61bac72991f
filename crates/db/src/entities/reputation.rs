//! User reputation entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Party;

/// Account standing derived from the reputation score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    #[default]
    Active,
    UnderReview,
    Suspended,
    /// Stored value only; no score maps here.
    Banned,
}

/// What kind of event moved a reputation score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReputationChangeType {
    DisputeWin,
    DisputeLoss,
    OrderCompleted,
    OrderFailed,
    Adjustment,
}

/// One entry of a user's reputation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReputationEvent {
    pub id: String,
    pub change_type: ReputationChangeType,
    /// Requested delta, before clamping.
    pub change_value: i32,
    pub previous_score: i32,
    pub new_score: i32,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dispute_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Reputation model, one per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserReputation {
    pub user_id: String,
    pub user_type: Party,
    pub reputation_score: i32,
    #[serde(default)]
    pub total_orders: u32,
    #[serde(default)]
    pub dispute_count: u32,
    #[serde(default)]
    pub successful_orders: u32,
    pub account_status: AccountStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_dispute_date: Option<DateTime<Utc>>,
    /// Newest first.
    #[serde(default)]
    pub reputation_history: Vec<ReputationEvent>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
