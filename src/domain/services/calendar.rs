use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

use crate::domain::models::settings::BusinessHours;
use crate::domain::models::staff::WeekHours;

/// Minutes since midnight for an "HH:MM" slot label.
pub fn parse_label(label: &str) -> Option<i64> {
    let t = NaiveTime::parse_from_str(label, "%H:%M").ok()?;
    Some(t.hour() as i64 * 60 + t.minute() as i64)
}

pub fn format_label(minutes: i64) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// The open interval for `date` in minutes since midnight, intersected with
/// the staff member's working hours when given. `None` when the salon (or
/// the stylist) is off that weekday, or when the window is empty.
pub fn day_window(
    hours: &BusinessHours,
    date: NaiveDate,
    staff_hours: Option<&WeekHours>,
) -> Option<(i64, i64)> {
    let salon_day = hours.week.for_weekday(date.weekday());
    if !salon_day.is_working {
        return None;
    }

    let mut start = parse_label(&salon_day.start)?;
    let mut end = parse_label(&salon_day.end)?;

    if let Some(week) = staff_hours {
        let staff_day = week.for_weekday(date.weekday());
        if !staff_day.is_working {
            return None;
        }
        start = start.max(parse_label(&staff_day.start)?);
        end = end.min(parse_label(&staff_day.end)?);
    }

    if start < end {
        Some((start, end))
    } else {
        None
    }
}

/// Ordered slot labels for a date: every interval-aligned start time whose
/// slot fits entirely before closing. Empty for non-working days.
pub fn day_slots(
    hours: &BusinessHours,
    date: NaiveDate,
    staff_hours: Option<&WeekHours>,
) -> Vec<String> {
    let interval = hours.slot_interval_min;
    if interval <= 0 {
        return Vec::new();
    }

    let Some((start, end)) = day_window(hours, date, staff_hours) else {
        return Vec::new();
    };

    let mut slots = Vec::new();
    let mut cursor = start;
    while cursor + interval <= end {
        slots.push(format_label(cursor));
        cursor += interval;
    }
    slots
}
