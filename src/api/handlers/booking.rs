use std::sync::Arc;

use axum::{extract::{Path, Query, State}, response::IntoResponse, Json};
use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use crate::api::dtos::requests::{
    BookingListQuery, ConfirmBookingRequest, CreateBookingRequest, SetStatusRequest,
};
use crate::api::dtos::responses::ConfirmBookingResponse;
use crate::api::extractors::actor::{AdminUser, StaffUser};
use crate::domain::models::booking::{Booking, NewBookingParams};
use crate::domain::models::loyalty::{EntryKind, LoyaltyEntry};
use crate::domain::services::availability::free_slots;
use crate::domain::services::lifecycle;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.customer_name.trim().is_empty() {
        return Err(AppError::Validation("Customer name is required".into()));
    }
    if !payload.customer_email.contains('@') {
        return Err(AppError::Validation("Invalid email address".into()));
    }

    let date = NaiveDate::parse_from_str(&payload.date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format (YYYY-MM-DD)".into()))?;

    let service = state
        .service_repo
        .find_by_id(&payload.service_id)
        .await?
        .ok_or(AppError::NotFound("Service not found".into()))?;
    if !service.is_active {
        return Err(AppError::Validation("Service is no longer offered".into()));
    }

    let staff = match &payload.staff_id {
        Some(staff_id) => {
            let member = state
                .staff_repo
                .find_by_id(staff_id)
                .await?
                .ok_or(AppError::NotFound("Staff member not found".into()))?;
            if !member.is_active {
                return Err(AppError::Validation("Staff member is not available".into()));
            }
            if !member.can_perform(&service.id) {
                return Err(AppError::Validation(
                    "Staff member does not offer this service".into(),
                ));
            }
            Some(member)
        }
        None => None,
    };

    let booking = Booking::new(NewBookingParams {
        customer_name: payload.customer_name,
        customer_email: payload.customer_email,
        customer_phone: payload.customer_phone.unwrap_or_default(),
        service_id: service.id.clone(),
        service_name: service.name.clone(),
        staff_id: staff.as_ref().map(|s| s.id.clone()),
        date,
        time: payload.time,
        duration_min: service.duration_min,
        notes: payload.notes,
    });

    let start = booking
        .start_datetime()
        .ok_or_else(|| AppError::Validation("Invalid time format (HH:MM)".into()))?;
    if start <= Utc::now().naive_utc() {
        return Err(AppError::Validation("Cannot book in the past".into()));
    }

    let hours = state.settings_repo.business_hours().await?;
    let staff_hours = staff.as_ref().map(|s| s.working_hours());
    let existing = state
        .booking_repo
        .list_active_by_date(date, booking.staff_id.as_deref())
        .await?;

    let valid_slots = free_slots(
        &hours,
        staff_hours.as_ref(),
        date,
        &existing,
        Some(service.duration_min),
    );
    if !valid_slots.contains(&booking.time) {
        warn!(
            "Booking rejected: slot {} {} not available. Valid slots: {:?}",
            date, booking.time, valid_slots
        );
        return Err(AppError::Conflict(
            "Selected time slot is not available".into(),
        ));
    }

    let created = state.booking_repo.create(&booking).await?;
    info!("Booking created: {} ({} on {} at {})", created.id, created.service_name, created.date, created.time);
    Ok(Json(created))
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    StaffUser(_): StaffUser,
    Query(query): Query<BookingListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let date = match &query.date {
        Some(raw) => Some(
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| AppError::Validation("Invalid date format (YYYY-MM-DD)".into()))?,
        ),
        None => None,
    };

    let bookings = state.booking_repo.list(date).await?;
    Ok(Json(bookings))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    StaffUser(_): StaffUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state
        .booking_repo
        .find_by_id(&booking_id)
        .await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;
    Ok(Json(booking))
}

pub async fn confirm_booking(
    State(state): State<Arc<AppState>>,
    StaffUser(_): StaffUser,
    Path(booking_id): Path<String>,
    Json(payload): Json<ConfirmBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut booking = state
        .booking_repo
        .find_by_id(&booking_id)
        .await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    lifecycle::confirm(&mut booking, payload.price_cents)?;
    let updated = state.booking_repo.update(&booking).await?;
    info!("Booking confirmed: {} at {} cents", updated.id, payload.price_cents);

    // Best-effort: a failed notification downgrades the response, it never
    // rolls back the confirmation.
    let body = format!(
        "Your {} appointment on {} at {} is confirmed.",
        updated.service_name, updated.date, updated.time
    );
    let notification_sent = match state
        .notifier
        .send(&updated.customer_email, "Appointment confirmed", &body)
        .await
    {
        Ok(()) => true,
        Err(e) => {
            warn!("Confirmation notification failed for {}: {}", updated.id, e);
            false
        }
    };

    Ok(Json(ConfirmBookingResponse {
        booking: updated,
        notification_sent,
    }))
}

pub async fn complete_booking(
    State(state): State<Arc<AppState>>,
    StaffUser(_): StaffUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut booking = state
        .booking_repo
        .find_by_id(&booking_id)
        .await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    lifecycle::complete(&mut booking)?;
    let updated = state.booking_repo.update(&booking).await?;
    info!("Booking completed: {}", updated.id);

    accrue_completion_points(&state, &updated).await;

    Ok(Json(updated))
}

/// Credits program points for a completed booking at most once; the repo
/// burns the loyalty_credited flag inside the ledger transaction. Best
/// effort: the booking is already completed, so a failed credit is logged
/// and stays retryable through the manual earn endpoint.
async fn accrue_completion_points(state: &Arc<AppState>, booking: &Booking) {
    let program = match state.settings_repo.loyalty_program().await {
        Ok(program) => program,
        Err(e) => {
            warn!("Loyalty program unavailable for booking {}: {}", booking.id, e);
            return;
        }
    };
    if !program.is_active {
        return;
    }

    let points = program.points_per_booking
        + booking
            .price_cents
            .map_or(0, |cents| program.points_per_dollar * (cents / 100));
    if points <= 0 {
        return;
    }

    let entry = LoyaltyEntry::new(
        &booking.customer_email,
        points,
        EntryKind::Earned,
        "booking_completed",
        Some(booking.id.clone()),
        format!("Completed {}", booking.service_name),
    );
    match state.loyalty_repo.earn(&entry).await {
        Ok(account) => info!(
            "Loyalty credit: {} points to {} (balance {})",
            points, account.email, account.points
        ),
        Err(e) => warn!("Loyalty credit failed for booking {}: {}", booking.id, e),
    }
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    StaffUser(actor): StaffUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut booking = state
        .booking_repo
        .find_by_id(&booking_id)
        .await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    lifecycle::cancel(&mut booking, actor, Utc::now().naive_utc())?;
    let updated = state.booking_repo.update(&booking).await?;
    info!("Booking cancelled by staff: {}", updated.id);
    Ok(Json(updated))
}

/// Admin escape hatch: writes the status directly, bypassing the lifecycle
/// guards, and runs no side effects (no accrual, no notification).
pub async fn set_booking_status(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(booking_id): Path<String>,
    Json(payload): Json<SetStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut booking = state
        .booking_repo
        .find_by_id(&booking_id)
        .await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    warn!(
        "Admin status override on booking {}: {} -> {}",
        booking.id, booking.status, payload.status
    );
    lifecycle::force_status(&mut booking, payload.status);
    let updated = state.booking_repo.update(&booking).await?;
    Ok(Json(updated))
}
