use chrono::{Duration, NaiveDate};

use crate::domain::models::booking::{Booking, BookingStatus};
use crate::domain::models::settings::BusinessHours;
use crate::domain::models::staff::WeekHours;
use crate::domain::services::calendar::{self, parse_label};

/// Every date from `start` to `end` inclusive; empty when start > end.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut cursor = start;
    while cursor <= end {
        dates.push(cursor);
        cursor += Duration::days(1);
    }
    dates
}

/// Free slot labels for one date: the Business Calendar's slots minus those
/// whose start falls inside an occupied `[time, time+duration)` interval.
/// With `required_min`, slots without that much contiguous room before the
/// next occupied interval or closing time are also dropped.
///
/// `bookings` should already be filtered to the date (and stylist, if any);
/// cancelled entries are ignored either way.
pub fn free_slots(
    hours: &BusinessHours,
    staff_hours: Option<&WeekHours>,
    date: NaiveDate,
    bookings: &[Booking],
    required_min: Option<i64>,
) -> Vec<String> {
    let Some((_, window_end)) = calendar::day_window(hours, date, staff_hours) else {
        return Vec::new();
    };

    let mut occupied: Vec<(i64, i64)> = bookings
        .iter()
        .filter(|b| b.status != BookingStatus::Cancelled)
        .filter_map(|b| {
            let start = parse_label(&b.time)?;
            Some((start, start + b.duration_min))
        })
        .collect();
    occupied.sort_unstable();

    calendar::day_slots(hours, date, staff_hours)
        .into_iter()
        .filter(|label| {
            let Some(slot) = parse_label(label) else {
                return false;
            };

            if occupied.iter().any(|&(s, e)| s <= slot && slot < e) {
                return false;
            }

            match required_min {
                Some(required) => {
                    let limit = occupied
                        .iter()
                        .map(|&(s, _)| s)
                        .filter(|&s| s > slot)
                        .min()
                        .map_or(window_end, |next| next.min(window_end));
                    slot + required <= limit
                }
                None => true,
            }
        })
        .collect()
}
