use crate::domain::models::booking::Booking;
use crate::domain::ports::BookingRepository;
use crate::domain::services::calendar::parse_label;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        let start = parse_label(&booking.time)
            .ok_or_else(|| AppError::Validation("Invalid time label".into()))?;
        let end = start + booking.duration_min;

        // Check-and-insert inside one transaction; the partial unique index
        // on (date, time, staff_id) backstops the stylist case.
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let same_day = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE date = ? AND status != 'cancelled'",
        )
        .bind(booking.date)
        .fetch_all(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        let conflict = same_day.iter().any(|existing| {
            let relevant = match &booking.staff_id {
                Some(id) => existing.staff_id.as_deref() == Some(id.as_str()),
                None => true,
            };
            if !relevant {
                return false;
            }
            match parse_label(&existing.time) {
                Some(s) => s < end && s + existing.duration_min > start,
                None => false,
            }
        });

        if conflict {
            return Err(AppError::Conflict("Slot is no longer available".into()));
        }

        let created = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, customer_name, customer_email, customer_phone, service_id, service_name, staff_id, date, time, duration_min, status, price_cents, notes, management_token, loyalty_credited, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&booking.id)
        .bind(&booking.customer_name)
        .bind(&booking.customer_email)
        .bind(&booking.customer_phone)
        .bind(&booking.service_id)
        .bind(&booking.service_name)
        .bind(&booking.staff_id)
        .bind(booking.date)
        .bind(&booking.time)
        .bind(booking.duration_min)
        .bind(booking.status)
        .bind(booking.price_cents)
        .bind(&booking.notes)
        .bind(&booking.management_token)
        .bind(booking.loyalty_credited)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE management_token = ?")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_active_by_date(
        &self,
        date: NaiveDate,
        staff_id: Option<&str>,
    ) -> Result<Vec<Booking>, AppError> {
        match staff_id {
            Some(id) => sqlx::query_as::<_, Booking>(
                "SELECT * FROM bookings WHERE date = ? AND staff_id = ? AND status != 'cancelled' ORDER BY time ASC",
            )
            .bind(date)
            .bind(id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database),
            None => sqlx::query_as::<_, Booking>(
                "SELECT * FROM bookings WHERE date = ? AND status != 'cancelled' ORDER BY time ASC",
            )
            .bind(date)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database),
        }
    }

    async fn list(&self, date: Option<NaiveDate>) -> Result<Vec<Booking>, AppError> {
        match date {
            Some(d) => sqlx::query_as::<_, Booking>(
                "SELECT * FROM bookings WHERE date = ? ORDER BY time ASC",
            )
            .bind(d)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database),
            None => sqlx::query_as::<_, Booking>(
                "SELECT * FROM bookings ORDER BY date ASC, time ASC",
            )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database),
        }
    }

    async fn update(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = ?, price_cents = ?, notes = ?, updated_at = ?
             WHERE id = ?
             RETURNING *",
        )
        .bind(booking.status)
        .bind(booking.price_cents)
        .bind(&booking.notes)
        .bind(booking.updated_at)
        .bind(&booking.id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
