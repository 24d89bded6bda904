use std::sync::Arc;

use crate::config::Config;
use crate::domain::ports::{
    BookingRepository, LoyaltyRepository, NotificationService, ServiceRepository,
    SettingsRepository, StaffRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub service_repo: Arc<dyn ServiceRepository>,
    pub staff_repo: Arc<dyn StaffRepository>,
    pub loyalty_repo: Arc<dyn LoyaltyRepository>,
    pub settings_repo: Arc<dyn SettingsRepository>,
    pub notifier: Arc<dyn NotificationService>,
}
