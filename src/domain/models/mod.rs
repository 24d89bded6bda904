pub mod booking;
pub mod loyalty;
pub mod service;
pub mod settings;
pub mod staff;
