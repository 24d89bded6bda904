use serde::{Deserialize, Serialize};

use crate::domain::models::staff::WeekHours;

pub const BUSINESS_HOURS_KEY: &str = "business_hours";
pub const LOYALTY_PROGRAM_KEY: &str = "loyalty_program";

/// Salon-wide operating hours and slot granularity.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BusinessHours {
    pub week: WeekHours,
    pub slot_interval_min: i64,
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            week: WeekHours::default(),
            slot_interval_min: 30,
        }
    }
}

/// Singleton loyalty program configuration. Changes apply prospectively
/// only; historical ledger entries are never rewritten.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoyaltyProgram {
    pub points_per_booking: i64,
    /// Extra points per whole dollar of the confirmed price.
    pub points_per_dollar: i64,
    pub reward_threshold: i64,
    pub reward_amount_cents: i64,
    pub birthday_discount_percent: i64,
    pub birthday_window_days: i64,
    pub is_active: bool,
}

impl Default for LoyaltyProgram {
    fn default() -> Self {
        Self {
            points_per_booking: 10,
            points_per_dollar: 1,
            reward_threshold: 100,
            reward_amount_cents: 1000,
            birthday_discount_percent: 10,
            birthday_window_days: 7,
            is_active: true,
        }
    }
}
