use std::sync::Arc;

use axum::{extract::{Path, State}, response::IntoResponse, Json};
use chrono::Utc;
use tracing::info;

use crate::domain::services::lifecycle::{self, Actor};
use crate::error::AppError;
use crate::state::AppState;

/// Customer-facing booking view, addressed by the opaque management token
/// issued at creation time.
pub async fn get_booking_by_token(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state
        .booking_repo
        .find_by_token(&token)
        .await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    Ok(Json(booking))
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut booking = state
        .booking_repo
        .find_by_token(&token)
        .await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    lifecycle::cancel(&mut booking, Actor::Customer, Utc::now().naive_utc())?;
    let updated = state.booking_repo.update(&booking).await?;
    info!("Booking cancelled via management token: {}", updated.id);
    Ok(Json(updated))
}
