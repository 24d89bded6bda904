use std::sync::Arc;

use axum::{extract::{Path, State}, response::IntoResponse, Json};
use tracing::info;

use crate::api::dtos::requests::{EarnPointsRequest, RedeemPointsRequest};
use crate::api::extractors::actor::StaffUser;
use crate::domain::models::booking::BookingStatus;
use crate::domain::models::loyalty::{CustomerLoyalty, EntryKind, LoyaltyEntry};
use crate::error::AppError;
use crate::state::AppState;

/// Balance snapshot. A customer with no ledger yet gets a zero-state, which
/// is a new customer, not an error.
pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let account = state
        .loyalty_repo
        .find(&email)
        .await?
        .unwrap_or_else(|| CustomerLoyalty::zero(&email));
    Ok(Json(account))
}

pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let history = state.loyalty_repo.history(&email).await?;
    Ok(Json(history))
}

/// Staff-mediated: redemptions happen at the front desk. Customers have no
/// per-account token, so an open route would let anyone who knows an email
/// drain its balance.
pub async fn redeem_points(
    State(state): State<Arc<AppState>>,
    StaffUser(_): StaffUser,
    Path(email): Path<String>,
    Json(payload): Json<RedeemPointsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let program = state.settings_repo.loyalty_program().await?;
    if !program.is_active {
        return Err(AppError::Conflict("Loyalty program is not active".into()));
    }

    let entry = LoyaltyEntry::new(
        &email,
        payload.points,
        EntryKind::Redeemed,
        "reward_redemption",
        None,
        payload
            .description
            .unwrap_or_else(|| "Reward redemption".to_string()),
    );

    let account = state.loyalty_repo.redeem(&entry).await?;
    info!(
        "Loyalty redemption: {} points by {} (balance {})",
        payload.points, account.email, account.points
    );
    Ok(Json(account))
}

/// Manual accrual for a completed booking, e.g. after an admin status fix or
/// a failed automatic credit. The repo keeps this once-per-booking.
pub async fn earn_points(
    State(state): State<Arc<AppState>>,
    StaffUser(_): StaffUser,
    Path(email): Path<String>,
    Json(payload): Json<EarnPointsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let program = state.settings_repo.loyalty_program().await?;
    if !program.is_active {
        return Err(AppError::Conflict("Loyalty program is not active".into()));
    }

    let booking = state
        .booking_repo
        .find_by_id(&payload.booking_id)
        .await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    if booking.status != BookingStatus::Completed {
        return Err(AppError::Validation(
            "Points can only be earned for completed bookings".into(),
        ));
    }
    if booking.customer_email != email.to_lowercase() {
        return Err(AppError::Validation(
            "Booking belongs to a different customer".into(),
        ));
    }

    let points = program.points_per_booking
        + booking
            .price_cents
            .map_or(0, |cents| program.points_per_dollar * (cents / 100));

    let entry = LoyaltyEntry::new(
        &booking.customer_email,
        points,
        EntryKind::Earned,
        "manual_accrual",
        Some(booking.id.clone()),
        format!("Completed {}", booking.service_name),
    );
    let account = state.loyalty_repo.earn(&entry).await?;
    info!(
        "Manual loyalty credit: {} points to {} for booking {}",
        points, account.email, booking.id
    );
    Ok(Json(account))
}
