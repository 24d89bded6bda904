use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Earned,
    Redeemed,
}

/// Per-customer running balance, keyed by lower-cased email.
/// Invariant: points == total_points_earned - total_points_redeemed, >= 0.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct CustomerLoyalty {
    pub email: String,
    pub points: i64,
    pub total_points_earned: i64,
    pub total_points_redeemed: i64,
    pub rewards_redeemed: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CustomerLoyalty {
    /// Zero-state for a customer with no ledger yet. Not persisted until
    /// the first earn/redeem touches the account.
    pub fn zero(email: &str) -> Self {
        let now = Utc::now();
        Self {
            email: email.to_lowercase(),
            points: 0,
            total_points_earned: 0,
            total_points_redeemed: 0,
            rewards_redeemed: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct LoyaltyEntry {
    pub id: String,
    pub email: String,
    pub points: i64,
    pub entry_type: EntryKind,
    pub source: String,
    pub related_booking_id: Option<String>,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl LoyaltyEntry {
    pub fn new(
        email: &str,
        points: i64,
        entry_type: EntryKind,
        source: &str,
        related_booking_id: Option<String>,
        description: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.to_lowercase(),
            points,
            entry_type,
            source: source.to_string(),
            related_booking_id,
            description,
            created_at: Utc::now(),
        }
    }
}
