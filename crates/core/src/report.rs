//! Aggregate figures for the admin dashboard over an inclusive date range.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    errors::{BookingError, BookingResult},
    models::{
        appointment::{Appointment, AppointmentStatus},
        time_entry::TimeEntry,
        worker::Worker,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> BookingResult<Self> {
        if end < start {
            return Err(BookingError::Validation(format!(
                "report range ends ({end}) before it starts ({start})"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentSummary {
    pub name: String,
    pub workers: usize,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub range: DateRange,
    pub total_workers: usize,
    pub active_workers: usize,
    pub total_appointments: usize,
    pub pending_appointments: usize,
    pub confirmed_appointments: usize,
    pub cancelled_appointments: usize,
    pub total_hours_worked: f64,
    pub average_hours_per_worker: f64,
    pub departments: Vec<DepartmentSummary>,
}

impl ReportSummary {
    /// Worker counts cover every worker regardless of range; appointments and
    /// hours only those dated inside `range`.
    pub fn build(
        range: DateRange,
        workers: &[Worker],
        appointments: &[Appointment],
        time_entries: &[TimeEntry],
    ) -> Self {
        let in_range: Vec<&Appointment> = appointments
            .iter()
            .filter(|a| range.contains(a.date))
            .collect();
        let entries: Vec<&TimeEntry> = time_entries
            .iter()
            .filter(|e| range.contains(e.date))
            .collect();

        let count = |status: AppointmentStatus| {
            in_range.iter().filter(|a| a.status == status).count()
        };

        let total_hours: f64 = entries.iter().map(|e| e.hours).sum();
        let active_workers = workers.iter().filter(|w| w.is_active).count();
        let average = if active_workers > 0 {
            total_hours / active_workers as f64
        } else {
            0.0
        };

        let mut departments: BTreeMap<&str, DepartmentSummary> = BTreeMap::new();
        for worker in workers {
            let summary = departments
                .entry(worker.department.as_str())
                .or_insert_with(|| DepartmentSummary {
                    name: worker.department.clone(),
                    workers: 0,
                    hours: 0.0,
                });
            summary.workers += 1;
            summary.hours += entries
                .iter()
                .filter(|e| e.worker_id == worker.id)
                .map(|e| e.hours)
                .sum::<f64>();
        }

        Self {
            range,
            total_workers: workers.len(),
            active_workers,
            total_appointments: in_range.len(),
            pending_appointments: count(AppointmentStatus::Pending),
            confirmed_appointments: count(AppointmentStatus::Confirmed),
            cancelled_appointments: count(AppointmentStatus::Cancelled),
            total_hours_worked: total_hours,
            average_hours_per_worker: average,
            departments: departments.into_values().collect(),
        }
    }
}
