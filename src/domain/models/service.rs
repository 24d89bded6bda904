use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: String,
    pub duration_min: i64,
    pub price_cents: i64,
    pub category: String,
    /// Deactivation hides the service from customer-facing selection
    /// without deleting booking history that references it.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Service {
    pub fn new(
        name: String,
        description: String,
        duration_min: i64,
        price_cents: i64,
        category: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            description,
            duration_min,
            price_cents,
            category,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}
