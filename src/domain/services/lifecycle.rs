use chrono::{NaiveDateTime, Utc};

use crate::domain::models::booking::{Booking, BookingStatus};
use crate::error::AppError;

/// Who is acting on a booking. Customers reach the API through per-booking
/// management tokens; staff and admin through the role header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Customer,
    Staff,
    Admin,
}

impl Actor {
    pub fn is_staff(&self) -> bool {
        matches!(self, Actor::Staff | Actor::Admin)
    }
}

/// pending -> confirmed, recording the quoted price. Rejects a second
/// confirmation rather than silently succeeding.
pub fn confirm(booking: &mut Booking, price_cents: i64) -> Result<(), AppError> {
    if price_cents < 0 {
        return Err(AppError::Validation("Price must not be negative".into()));
    }
    if booking.status != BookingStatus::Pending {
        return Err(AppError::InvalidTransition(format!(
            "Cannot confirm a {} booking",
            booking.status
        )));
    }

    booking.price_cents = Some(price_cents);
    booking.status = BookingStatus::Confirmed;
    booking.updated_at = Utc::now();
    Ok(())
}

/// confirmed -> completed. Completed is terminal, so a repeated call fails
/// here and loyalty accrual cannot run twice through this path.
pub fn complete(booking: &mut Booking) -> Result<(), AppError> {
    if booking.status != BookingStatus::Confirmed {
        return Err(AppError::InvalidTransition(format!(
            "Cannot complete a {} booking",
            booking.status
        )));
    }

    booking.status = BookingStatus::Completed;
    booking.updated_at = Utc::now();
    Ok(())
}

/// pending/confirmed -> cancelled. Customers may only cancel appointments
/// still in the future; staff may cancel regardless of time.
pub fn cancel(booking: &mut Booking, actor: Actor, now: NaiveDateTime) -> Result<(), AppError> {
    if booking.status.is_terminal() {
        return Err(AppError::InvalidTransition(format!(
            "Cannot cancel a {} booking",
            booking.status
        )));
    }

    if !actor.is_staff() {
        let in_future = booking.start_datetime().map_or(false, |start| start > now);
        if !in_future {
            return Err(AppError::Forbidden(
                "Past appointments can only be cancelled by staff".into(),
            ));
        }
    }

    booking.status = BookingStatus::Cancelled;
    booking.updated_at = Utc::now();
    Ok(())
}

/// Administrative escape hatch: sets the status directly, bypassing the
/// ordering guards above. Runs no side effects (no accrual, no
/// notification). Callers must restrict this to admins.
pub fn force_status(booking: &mut Booking, status: BookingStatus) {
    booking.status = status;
    booking.updated_at = Utc::now();
}
