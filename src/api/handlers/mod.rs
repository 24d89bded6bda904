pub mod availability;
pub mod booking;
pub mod booking_management;
pub mod catalog;
pub mod health;
pub mod loyalty;
pub mod settings;
pub mod staff;
