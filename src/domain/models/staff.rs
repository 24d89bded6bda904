use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One weekday's working window. Times are "HH:MM" labels in salon-local time.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DayHours {
    pub start: String,
    pub end: String,
    pub is_working: bool,
}

impl DayHours {
    pub fn working(start: &str, end: &str) -> Self {
        Self {
            start: start.to_string(),
            end: end.to_string(),
            is_working: true,
        }
    }

    pub fn off() -> Self {
        Self {
            start: "00:00".to_string(),
            end: "00:00".to_string(),
            is_working: false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WeekHours {
    pub monday: DayHours,
    pub tuesday: DayHours,
    pub wednesday: DayHours,
    pub thursday: DayHours,
    pub friday: DayHours,
    pub saturday: DayHours,
    pub sunday: DayHours,
}

impl Default for WeekHours {
    /// Closed Sundays, 09:00-17:30 otherwise.
    fn default() -> Self {
        Self {
            monday: DayHours::working("09:00", "17:30"),
            tuesday: DayHours::working("09:00", "17:30"),
            wednesday: DayHours::working("09:00", "17:30"),
            thursday: DayHours::working("09:00", "17:30"),
            friday: DayHours::working("09:00", "17:30"),
            saturday: DayHours::working("09:00", "17:30"),
            sunday: DayHours::off(),
        }
    }
}

impl WeekHours {
    pub fn for_weekday(&self, weekday: Weekday) -> &DayHours {
        match weekday {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Staff {
    pub id: String,
    pub name: String,
    pub title: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub working_hours_json: String,
    pub service_ids_json: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Staff {
    pub fn new(
        name: String,
        title: String,
        email: Option<String>,
        phone: Option<String>,
        working_hours: &WeekHours,
        service_ids: &[String],
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            title,
            email,
            phone,
            working_hours_json: serde_json::to_string(working_hours)
                .unwrap_or_else(|_| "{}".to_string()),
            service_ids_json: serde_json::to_string(service_ids)
                .unwrap_or_else(|_| "[]".to_string()),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    pub fn working_hours(&self) -> WeekHours {
        serde_json::from_str(&self.working_hours_json).unwrap_or_default()
    }

    pub fn service_ids(&self) -> Vec<String> {
        serde_json::from_str(&self.service_ids_json).unwrap_or_default()
    }

    pub fn can_perform(&self, service_id: &str) -> bool {
        let ids = self.service_ids();
        ids.is_empty() || ids.iter().any(|id| id == service_id)
    }
}
