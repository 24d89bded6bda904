use serde::{Deserialize, Deserializer};

use crate::domain::models::booking::BookingStatus;
use crate::domain::models::settings::{BusinessHours, LoyaltyProgram};
use crate::domain::models::staff::WeekHours;

#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub start: String,
    pub end: String,
    pub staff_id: Option<String>,
    pub service_id: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub service_id: String,
    pub staff_id: Option<String>,
    pub date: String,
    pub time: String,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct BookingListQuery {
    pub date: Option<String>,
}

#[derive(Deserialize)]
pub struct ConfirmBookingRequest {
    pub price_cents: i64,
}

#[derive(Deserialize)]
pub struct SetStatusRequest {
    pub status: BookingStatus,
}

#[derive(Deserialize)]
pub struct CreateServiceRequest {
    pub name: String,
    pub description: Option<String>,
    pub duration_min: i64,
    pub price_cents: i64,
    pub category: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateServiceRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration_min: Option<i64>,
    pub price_cents: Option<i64>,
    pub category: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
pub struct CreateStaffRequest {
    pub name: String,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub working_hours: Option<WeekHours>,
    pub service_ids: Option<Vec<String>>,
}

/// Distinguishes an absent field (leave unchanged) from an explicit `null`
/// (clear the value).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[derive(Deserialize)]
pub struct UpdateStaffRequest {
    pub name: Option<String>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    pub working_hours: Option<WeekHours>,
    pub service_ids: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
pub struct RedeemPointsRequest {
    pub points: i64,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct EarnPointsRequest {
    pub booking_id: String,
}

#[derive(Deserialize)]
pub struct UpdateBusinessHoursRequest {
    #[serde(flatten)]
    pub hours: BusinessHours,
}

#[derive(Deserialize)]
pub struct UpdateLoyaltyProgramRequest {
    #[serde(flatten)]
    pub program: LoyaltyProgram,
}
