use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub service_id: String,
    /// Snapshot of the catalog name at creation time; stable against later edits.
    pub service_name: String,
    pub staff_id: Option<String>,
    pub date: NaiveDate,
    /// Slot label, e.g. "14:30".
    pub time: String,
    pub duration_min: i64,
    pub status: BookingStatus,
    pub price_cents: Option<i64>,
    pub notes: Option<String>,
    pub management_token: String,
    pub loyalty_credited: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub service_id: String,
    pub service_name: String,
    pub staff_id: Option<String>,
    pub date: NaiveDate,
    pub time: String,
    pub duration_min: i64,
    pub notes: Option<String>,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(48)
            .map(char::from)
            .collect();

        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            customer_name: params.customer_name,
            customer_email: params.customer_email.to_lowercase(),
            customer_phone: params.customer_phone,
            service_id: params.service_id,
            service_name: params.service_name,
            staff_id: params.staff_id,
            date: params.date,
            time: params.time,
            duration_min: params.duration_min,
            status: BookingStatus::Pending,
            price_cents: None,
            notes: params.notes,
            management_token: token,
            loyalty_credited: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Appointment start as a naive datetime, if the slot label parses.
    pub fn start_datetime(&self) -> Option<NaiveDateTime> {
        NaiveTime::parse_from_str(&self.time, "%H:%M")
            .ok()
            .map(|t| self.date.and_time(t))
    }
}
