use serde::Serialize;

use crate::domain::models::booking::Booking;

/// Confirm may succeed while the customer notification does not; the caller
/// sees the degraded outcome instead of a hard failure.
#[derive(Serialize)]
pub struct ConfirmBookingResponse {
    pub booking: Booking,
    pub notification_sent: bool,
}
