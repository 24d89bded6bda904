use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use tracing::info;

use crate::api::dtos::requests::{UpdateBusinessHoursRequest, UpdateLoyaltyProgramRequest};
use crate::api::extractors::actor::{AdminUser, StaffUser};
use crate::domain::services::calendar::parse_label;
use crate::error::AppError;
use crate::state::AppState;

pub async fn get_business_hours(
    State(state): State<Arc<AppState>>,
    StaffUser(_): StaffUser,
) -> Result<impl IntoResponse, AppError> {
    let hours = state.settings_repo.business_hours().await?;
    Ok(Json(hours))
}

pub async fn update_business_hours(
    State(state): State<Arc<AppState>>,
    StaffUser(_): StaffUser,
    Json(payload): Json<UpdateBusinessHoursRequest>,
) -> Result<impl IntoResponse, AppError> {
    let hours = payload.hours;
    if hours.slot_interval_min <= 0 {
        return Err(AppError::Validation("Slot interval must be positive".into()));
    }

    for day in [
        &hours.week.monday,
        &hours.week.tuesday,
        &hours.week.wednesday,
        &hours.week.thursday,
        &hours.week.friday,
        &hours.week.saturday,
        &hours.week.sunday,
    ] {
        if day.is_working && (parse_label(&day.start).is_none() || parse_label(&day.end).is_none())
        {
            return Err(AppError::Validation(
                "Working-day hours must be HH:MM labels".into(),
            ));
        }
    }

    state.settings_repo.set_business_hours(&hours).await?;
    info!("Business hours updated");
    Ok(Json(hours))
}

pub async fn get_loyalty_program(
    State(state): State<Arc<AppState>>,
    StaffUser(_): StaffUser,
) -> Result<impl IntoResponse, AppError> {
    let program = state.settings_repo.loyalty_program().await?;
    Ok(Json(program))
}

/// Applies prospectively only; existing ledger entries are untouched.
pub async fn update_loyalty_program(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<UpdateLoyaltyProgramRequest>,
) -> Result<impl IntoResponse, AppError> {
    let program = payload.program;
    if program.points_per_booking < 0 || program.points_per_dollar < 0 {
        return Err(AppError::Validation("Point rates must not be negative".into()));
    }
    if program.reward_threshold < 0 || program.reward_amount_cents < 0 {
        return Err(AppError::Validation("Reward values must not be negative".into()));
    }

    state.settings_repo.set_loyalty_program(&program).await?;
    info!("Loyalty program updated");
    Ok(Json(program))
}
