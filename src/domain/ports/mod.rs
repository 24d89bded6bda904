use crate::domain::models::{
    booking::Booking,
    loyalty::{CustomerLoyalty, LoyaltyEntry},
    service::Service,
    settings::{BusinessHours, LoyaltyProgram},
    staff::Staff,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert the booking, re-checking slot occupancy inside the same
    /// transaction. Returns `Conflict` if the slot was taken in between.
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn find_by_token(&self, token: &str) -> Result<Option<Booking>, AppError>;
    /// Non-cancelled bookings on a date; `staff_id` narrows to one stylist.
    async fn list_active_by_date(
        &self,
        date: NaiveDate,
        staff_id: Option<&str>,
    ) -> Result<Vec<Booking>, AppError>;
    async fn list(&self, date: Option<NaiveDate>) -> Result<Vec<Booking>, AppError>;
    async fn update(&self, booking: &Booking) -> Result<Booking, AppError>;
}

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn create(&self, service: &Service) -> Result<Service, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Service>, AppError>;
    async fn list(&self, include_inactive: bool) -> Result<Vec<Service>, AppError>;
    async fn update(&self, service: &Service) -> Result<Service, AppError>;
}

#[async_trait]
pub trait StaffRepository: Send + Sync {
    async fn create(&self, staff: &Staff) -> Result<Staff, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Staff>, AppError>;
    async fn list(&self, include_inactive: bool) -> Result<Vec<Staff>, AppError>;
    async fn update(&self, staff: &Staff) -> Result<Staff, AppError>;
}

#[async_trait]
pub trait LoyaltyRepository: Send + Sync {
    async fn find(&self, email: &str) -> Result<Option<CustomerLoyalty>, AppError>;
    async fn history(&self, email: &str) -> Result<Vec<LoyaltyEntry>, AppError>;
    /// Appends an earned entry and increments the balance atomically. An
    /// entry carrying a `related_booking_id` also burns that booking's
    /// loyalty-credited flag in the same transaction and fails with
    /// `Conflict` if it was already burned.
    async fn earn(&self, entry: &LoyaltyEntry) -> Result<CustomerLoyalty, AppError>;
    /// Conditional decrement: fails with `InsufficientPoints` and leaves the
    /// balance untouched when the entry exceeds it.
    async fn redeem(&self, entry: &LoyaltyEntry) -> Result<CustomerLoyalty, AppError>;
}

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn business_hours(&self) -> Result<BusinessHours, AppError>;
    async fn set_business_hours(&self, hours: &BusinessHours) -> Result<(), AppError>;
    async fn loyalty_program(&self) -> Result<LoyaltyProgram, AppError>;
    async fn set_loyalty_program(&self, program: &LoyaltyProgram) -> Result<(), AppError>;
}

#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), AppError>;
}
