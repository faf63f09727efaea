use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::clock::ClockTime;
use crate::errors::{BookingError, BookingResult};

pub const MAX_REASON_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl AppointmentStatus {
    /// `pending -> confirmed`, `pending -> cancelled`, `confirmed -> cancelled`.
    /// Nothing leaves `cancelled` and staying put is not a transition.
    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Cancelled)
        )
    }

    pub fn transition(self, next: AppointmentStatus) -> BookingResult<AppointmentStatus> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(BookingError::Validation(format!(
                "appointment cannot move from {self} to {next}"
            )))
        }
    }

    pub fn is_active(self) -> bool {
        self != AppointmentStatus::Cancelled
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AppointmentStatus::Pending),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(BookingError::Validation(format!(
                "unknown appointment status '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub worker_id: Uuid,
    /// Display copy of the worker's name at booking time. Never used as a key.
    pub worker_name: String,
    pub department: String,
    pub date: NaiveDate,
    pub time: ClockTime,
    pub requested_by: String,
    pub reason: String,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    /// Whether this appointment holds `(worker_id, date, time)`.
    pub fn occupies(&self, worker_id: Uuid, date: NaiveDate, time: ClockTime) -> bool {
        self.status.is_active()
            && self.worker_id == worker_id
            && self.date == date
            && self.time == time
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub worker_id: Uuid,
    pub date: NaiveDate,
    pub time: ClockTime,
    pub reason: String,
}

impl CreateAppointmentRequest {
    pub fn validate(&self) -> BookingResult<()> {
        validate_reason(&self.reason)
    }
}

pub fn validate_reason(reason: &str) -> BookingResult<()> {
    if reason.trim().is_empty() {
        return Err(BookingError::Validation(
            "a reason for the appointment is required".to_string(),
        ));
    }
    let chars = reason.chars().count();
    if chars > MAX_REASON_CHARS {
        return Err(BookingError::Validation(format!(
            "reason is {chars} characters, the limit is {MAX_REASON_CHARS}"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescheduleRequest {
    pub date: NaiveDate,
    pub time: ClockTime,
}

/// Admin listing filter. Every field that is set must match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentFilter {
    pub status: Option<AppointmentStatus>,
    pub date: Option<NaiveDate>,
    /// Case-insensitive substring of the worker's display name.
    pub worker: Option<String>,
}

impl AppointmentFilter {
    pub fn matches(&self, appointment: &Appointment) -> bool {
        if self.status.is_some_and(|s| s != appointment.status) {
            return false;
        }
        if self.date.is_some_and(|d| d != appointment.date) {
            return false;
        }
        if let Some(needle) = self.worker.as_deref().filter(|n| !n.is_empty()) {
            let needle = needle.to_lowercase();
            if !appointment.worker_name.to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }

    /// Keeps matching appointments, most recent `(date, time)` first.
    pub fn apply(&self, appointments: Vec<Appointment>) -> Vec<Appointment> {
        let mut filtered: Vec<_> = appointments
            .into_iter()
            .filter(|a| self.matches(a))
            .collect();
        filtered.sort_by(|a, b| (b.date, b.time).cmp(&(a.date, a.time)));
        filtered
    }
}
