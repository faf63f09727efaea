use chrono::{NaiveDate, TimeZone, Utc};
use slotbook_core::{
    errors::{BookingError, BookingResult},
    models::{
        appointment::{Appointment, AppointmentStatus},
        clock::ClockTime,
        schedule::WorkSchedule,
        time_entry::TimeEntry,
        worker::Worker,
    },
};
use uuid::Uuid;

use crate::memory::Collections;

struct SeedWorker {
    name: &'static str,
    email: &'static str,
    position: &'static str,
    department: &'static str,
    hours: [&'static str; 4],
}

const WORKERS: [SeedWorker; 5] = [
    SeedWorker {
        name: "Marta Gil",
        email: "marta.gil@example.com",
        position: "HR Manager",
        department: "Human Resources",
        hours: ["08:00", "17:00", "12:00", "13:00"],
    },
    SeedWorker {
        name: "Carlos Romero",
        email: "carlos.romero@example.com",
        position: "Senior Developer",
        department: "Engineering",
        hours: ["09:00", "18:00", "13:00", "14:00"],
    },
    SeedWorker {
        name: "Ana Molina",
        email: "ana.molina@example.com",
        position: "Marketing Specialist",
        department: "Marketing",
        hours: ["08:30", "17:30", "12:30", "13:30"],
    },
    SeedWorker {
        name: "Luis Navarro",
        email: "luis.navarro@example.com",
        position: "Accountant",
        department: "Finance",
        hours: ["08:00", "16:00", "12:00", "13:00"],
    },
    SeedWorker {
        name: "Elena Ortiz",
        email: "elena.ortiz@example.com",
        position: "Sales Executive",
        department: "Sales",
        hours: ["09:00", "17:00", "13:00", "14:00"],
    },
];

fn time(s: &str) -> BookingResult<ClockTime> {
    s.parse()
}

fn date(s: &str) -> BookingResult<NaiveDate> {
    s.parse()
        .map_err(|_| BookingError::Validation(format!("'{s}' is not a date")))
}

fn appointment(
    worker: &Worker,
    on: &str,
    at: &str,
    reason: &str,
    status: AppointmentStatus,
    requested_by: &str,
) -> BookingResult<Appointment> {
    let booked_on = date(on)?.pred_opt().unwrap_or(NaiveDate::MIN);
    Ok(Appointment {
        id: Uuid::new_v4(),
        worker_id: worker.id,
        worker_name: worker.name.clone(),
        department: worker.department.clone(),
        date: date(on)?,
        time: time(at)?,
        requested_by: requested_by.to_string(),
        reason: reason.to_string(),
        status,
        created_at: Utc.from_utc_datetime(&booked_on.and_time(chrono::NaiveTime::MIN)),
    })
}

fn entry(worker: &Worker, on: &str, hours: f64, description: &str) -> BookingResult<TimeEntry> {
    Ok(TimeEntry {
        id: Uuid::new_v4(),
        worker_id: worker.id,
        date: date(on)?,
        hours,
        start_time: Some(worker.schedule.start()),
        end_time: Some(worker.schedule.end()),
        description: Some(description.to_string()),
    })
}

/// Sample data for a fresh in-memory store.
pub fn default_collections() -> BookingResult<Collections> {
    let workers = WORKERS
        .iter()
        .map(|seed| {
            let [start, end, break_start, break_end] = seed.hours;
            Ok(Worker {
                id: Uuid::new_v4(),
                name: seed.name.to_string(),
                email: seed.email.to_string(),
                phone: String::new(),
                position: seed.position.to_string(),
                department: seed.department.to_string(),
                schedule: WorkSchedule::with_single_break(
                    time(start)?,
                    time(end)?,
                    time(break_start)?,
                    time(break_end)?,
                )?,
                is_active: true,
            })
        })
        .collect::<BookingResult<Vec<_>>>()?;

    let appointments = vec![
        appointment(
            &workers[0],
            "2024-01-15",
            "10:00",
            "Performance review",
            AppointmentStatus::Confirmed,
            "client@example.com",
        )?,
        appointment(
            &workers[1],
            "2024-01-16",
            "14:30",
            "Project walkthrough",
            AppointmentStatus::Pending,
            "client@example.com",
        )?,
        appointment(
            &workers[2],
            "2024-01-17",
            "11:00",
            "Campaign planning",
            AppointmentStatus::Confirmed,
            "partner@example.com",
        )?,
    ];

    let time_entries = vec![
        entry(&workers[0], "2024-01-15", 8.0, "Regular shift")?,
        entry(&workers[1], "2024-01-15", 8.0, "Feature work")?,
        entry(&workers[2], "2024-01-15", 8.0, "Campaign work")?,
    ];

    Ok(Collections {
        workers,
        appointments,
        time_entries,
        users: Vec::new(),
    })
}
