use crate::domain::models::settings::{
    BusinessHours, LoyaltyProgram, BUSINESS_HOURS_KEY, LOYALTY_PROGRAM_KEY,
};
use crate::domain::ports::SettingsRepository;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::{Row, SqlitePool};

pub struct SqliteSettingsRepo {
    pool: SqlitePool,
}

impl SqliteSettingsRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Missing or unparsable rows fall back to the type's default, so a
    /// fresh database serves the stock configuration without seeding.
    async fn get_json<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T, AppError> {
        let row = sqlx::query("SELECT value_json FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(row
            .and_then(|r| serde_json::from_str(r.get::<String, _>("value_json").as_str()).ok())
            .unwrap_or_default())
    }

    async fn put_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), AppError> {
        let json = serde_json::to_string(value)
            .map_err(|e| AppError::InternalWithMsg(format!("Settings encode error: {}", e)))?;

        sqlx::query(
            "INSERT INTO settings (key, value_json, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value_json = excluded.value_json, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(json)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(())
    }
}

#[async_trait]
impl SettingsRepository for SqliteSettingsRepo {
    async fn business_hours(&self) -> Result<BusinessHours, AppError> {
        self.get_json(BUSINESS_HOURS_KEY).await
    }

    async fn set_business_hours(&self, hours: &BusinessHours) -> Result<(), AppError> {
        self.put_json(BUSINESS_HOURS_KEY, hours).await
    }

    async fn loyalty_program(&self) -> Result<LoyaltyProgram, AppError> {
        self.get_json(LOYALTY_PROGRAM_KEY).await
    }

    async fn set_loyalty_program(&self, program: &LoyaltyProgram) -> Result<(), AppError> {
        self.put_json(LOYALTY_PROGRAM_KEY, program).await
    }
}
