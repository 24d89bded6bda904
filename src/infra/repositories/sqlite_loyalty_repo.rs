use crate::domain::models::loyalty::{CustomerLoyalty, LoyaltyEntry};
use crate::domain::ports::LoyaltyRepository;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct SqliteLoyaltyRepo {
    pool: SqlitePool,
}

impl SqliteLoyaltyRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn insert_entry(
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        entry: &LoyaltyEntry,
    ) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO loyalty_history (id, email, points, entry_type, source, related_booking_id, description, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&entry.id)
        .bind(&entry.email)
        .bind(entry.points)
        .bind(entry.entry_type)
        .bind(&entry.source)
        .bind(&entry.related_booking_id)
        .bind(&entry.description)
        .bind(entry.created_at)
        .execute(&mut **tx)
        .await
        .map_err(AppError::Database)?;
        Ok(())
    }
}

#[async_trait]
impl LoyaltyRepository for SqliteLoyaltyRepo {
    async fn find(&self, email: &str) -> Result<Option<CustomerLoyalty>, AppError> {
        sqlx::query_as::<_, CustomerLoyalty>("SELECT * FROM customer_loyalty WHERE email = ?")
            .bind(email.to_lowercase())
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn history(&self, email: &str) -> Result<Vec<LoyaltyEntry>, AppError> {
        sqlx::query_as::<_, LoyaltyEntry>(
            "SELECT * FROM loyalty_history WHERE email = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(email.to_lowercase())
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn earn(&self, entry: &LoyaltyEntry) -> Result<CustomerLoyalty, AppError> {
        if entry.points <= 0 {
            return Err(AppError::Validation("Earned points must be positive".into()));
        }

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let now = Utc::now();

        // Booking-sourced credits burn the loyalty_credited flag in the same
        // transaction as the ledger write, so a failed write leaves the flag
        // clear and the credit retryable.
        if let Some(booking_id) = &entry.related_booking_id {
            let result = sqlx::query(
                "UPDATE bookings SET loyalty_credited = 1 WHERE id = ? AND loyalty_credited = 0",
            )
            .bind(booking_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

            if result.rows_affected() == 0 {
                return Err(AppError::Conflict(
                    "Points already credited for this booking".into(),
                ));
            }
        }

        sqlx::query(
            "INSERT INTO customer_loyalty (email, points, total_points_earned, total_points_redeemed, rewards_redeemed, created_at, updated_at)
             VALUES (?, ?, ?, 0, 0, ?, ?)
             ON CONFLICT(email) DO UPDATE SET
                 points = points + excluded.points,
                 total_points_earned = total_points_earned + excluded.points,
                 updated_at = excluded.updated_at",
        )
        .bind(&entry.email)
        .bind(entry.points)
        .bind(entry.points)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        Self::insert_entry(&mut tx, entry).await?;

        let account = sqlx::query_as::<_, CustomerLoyalty>(
            "SELECT * FROM customer_loyalty WHERE email = ?",
        )
        .bind(&entry.email)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(account)
    }

    async fn redeem(&self, entry: &LoyaltyEntry) -> Result<CustomerLoyalty, AppError> {
        if entry.points <= 0 {
            return Err(AppError::Validation("Redeemed points must be positive".into()));
        }

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // Conditional decrement: concurrent redemptions cannot push the
        // balance below zero, and a missing account simply matches no row.
        let result = sqlx::query(
            "UPDATE customer_loyalty
             SET points = points - ?,
                 total_points_redeemed = total_points_redeemed + ?,
                 rewards_redeemed = rewards_redeemed + 1,
                 updated_at = ?
             WHERE email = ? AND points >= ?",
        )
        .bind(entry.points)
        .bind(entry.points)
        .bind(Utc::now())
        .bind(&entry.email)
        .bind(entry.points)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::InsufficientPoints(format!(
                "Not enough points to redeem {}",
                entry.points
            )));
        }

        Self::insert_entry(&mut tx, entry).await?;

        let account = sqlx::query_as::<_, CustomerLoyalty>(
            "SELECT * FROM customer_loyalty WHERE email = ?",
        )
        .bind(&entry.email)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(account)
    }
}
