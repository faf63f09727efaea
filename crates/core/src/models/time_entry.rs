use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::clock::ClockTime;
use crate::errors::{BookingError, BookingResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: Uuid,
    pub worker_id: Uuid,
    pub date: NaiveDate,
    pub hours: f64,
    pub start_time: Option<ClockTime>,
    pub end_time: Option<ClockTime>,
    pub description: Option<String>,
}

/// Either `hours` directly, or `start_time`/`end_time` (less `break_minutes`)
/// from which hours are derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTimeEntryRequest {
    pub worker_id: Uuid,
    pub date: NaiveDate,
    pub hours: Option<f64>,
    pub start_time: Option<ClockTime>,
    pub end_time: Option<ClockTime>,
    #[serde(default)]
    pub break_minutes: u16,
    pub description: Option<String>,
}

/// Worked minutes between `start` and `end` less the break, floored at zero.
pub fn worked_minutes(start: ClockTime, end: ClockTime, break_minutes: u16) -> u16 {
    end.minutes_since(start)
        .unwrap_or(0)
        .saturating_sub(break_minutes)
}

impl CreateTimeEntryRequest {
    pub fn into_entry(self, id: Uuid) -> BookingResult<TimeEntry> {
        let derived = match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => {
                if end <= start {
                    return Err(BookingError::Validation(format!(
                        "end time {end} must be after start time {start}"
                    )));
                }
                Some(f64::from(worked_minutes(start, end, self.break_minutes)) / 60.0)
            }
            _ => None,
        };

        let hours = self.hours.or(derived).ok_or_else(|| {
            BookingError::Validation(
                "either hours or both start and end times are required".to_string(),
            )
        })?;

        if !(hours > 0.0 && hours <= 24.0) {
            return Err(BookingError::Validation(format!(
                "{hours} hours is outside the range (0, 24]"
            )));
        }

        Ok(TimeEntry {
            id,
            worker_id: self.worker_id,
            date: self.date,
            hours,
            start_time: self.start_time,
            end_time: self.end_time,
            description: self.description.filter(|d| !d.trim().is_empty()),
        })
    }
}
