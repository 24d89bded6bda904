pub mod sqlite_booking_repo;
pub mod sqlite_loyalty_repo;
pub mod sqlite_service_repo;
pub mod sqlite_settings_repo;
pub mod sqlite_staff_repo;
