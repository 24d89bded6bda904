use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::{Query, State}, response::IntoResponse, Json};
use chrono::NaiveDate;

use crate::api::dtos::requests::AvailabilityQuery;
use crate::domain::services::availability::{date_range, free_slots};
use crate::error::AppError;
use crate::state::AppState;

const MAX_RANGE_DAYS: i64 = 90;

pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, AppError> {
    let start = NaiveDate::parse_from_str(&query.start, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid start date (YYYY-MM-DD)".into()))?;
    let end = NaiveDate::parse_from_str(&query.end, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid end date (YYYY-MM-DD)".into()))?;

    if (end - start).num_days() >= MAX_RANGE_DAYS {
        return Err(AppError::Validation(format!(
            "Date range must be under {} days",
            MAX_RANGE_DAYS
        )));
    }

    let required_min = match &query.service_id {
        Some(service_id) => {
            let service = state
                .service_repo
                .find_by_id(service_id)
                .await?
                .ok_or(AppError::NotFound("Service not found".into()))?;
            Some(service.duration_min)
        }
        None => None,
    };

    let hours = state.settings_repo.business_hours().await?;
    let dates = date_range(start, end);

    // Unknown (or deactivated) stylist: fail safe with empty availability
    // on every date rather than erroring.
    let staff = match &query.staff_id {
        Some(staff_id) => {
            match state.staff_repo.find_by_id(staff_id).await? {
                Some(s) if s.is_active => Some(s),
                _ => {
                    let empty: BTreeMap<String, Vec<String>> = dates
                        .into_iter()
                        .map(|d| (d.to_string(), Vec::new()))
                        .collect();
                    return Ok(Json(empty));
                }
            }
        }
        None => None,
    };

    let staff_hours = staff.as_ref().map(|s| s.working_hours());
    let staff_filter = staff.as_ref().map(|s| s.id.as_str());

    let mut days: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for date in dates {
        let bookings = state
            .booking_repo
            .list_active_by_date(date, staff_filter)
            .await?;
        let slots = free_slots(&hours, staff_hours.as_ref(), date, &bookings, required_min);
        days.insert(date.to_string(), slots);
    }

    Ok(Json(days))
}
