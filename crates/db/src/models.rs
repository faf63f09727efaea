use chrono::{DateTime, NaiveDate, Utc};
use eyre::{eyre, Result, WrapErr};
use serde::{Deserialize, Serialize};
use slotbook_core::models::{
    appointment::Appointment,
    clock::ClockTime,
    schedule::{BreakInterval, WorkSchedule},
    time_entry::TimeEntry,
    user::User,
    worker::Worker,
};
use sqlx::{types::Json, FromRow};
use uuid::Uuid;

// Times of day are stored as minutes since midnight.

fn clock(minutes: i16) -> Result<ClockTime> {
    let minutes = u16::try_from(minutes).map_err(|_| eyre!("negative time of day: {minutes}"))?;
    Ok(ClockTime::from_minutes(minutes)?)
}

pub(crate) fn minutes(time: ClockTime) -> i16 {
    // always < 1440
    time.minutes() as i16
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbWorker {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub department: String,
    pub start_minute: i16,
    pub end_minute: i16,
    pub breaks: Json<Vec<BreakInterval>>,
    pub is_active: bool,
}

impl TryFrom<DbWorker> for Worker {
    type Error = eyre::Report;

    fn try_from(row: DbWorker) -> Result<Self> {
        let schedule = WorkSchedule::new(
            clock(row.start_minute)?,
            clock(row.end_minute)?,
            row.breaks.0,
        )
        .wrap_err_with(|| format!("stored schedule of worker {} is invalid", row.id))?;

        Ok(Worker {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            position: row.position,
            department: row.department,
            schedule,
            is_active: row.is_active,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub worker_id: Uuid,
    pub worker_name: String,
    pub department: String,
    pub date: NaiveDate,
    pub time_minute: i16,
    pub requested_by: String,
    pub reason: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbAppointment> for Appointment {
    type Error = eyre::Report;

    fn try_from(row: DbAppointment) -> Result<Self> {
        Ok(Appointment {
            id: row.id,
            worker_id: row.worker_id,
            worker_name: row.worker_name,
            department: row.department,
            date: row.date,
            time: clock(row.time_minute)?,
            requested_by: row.requested_by,
            reason: row.reason,
            status: row.status.parse()?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTimeEntry {
    pub id: Uuid,
    pub worker_id: Uuid,
    pub date: NaiveDate,
    pub hours: f64,
    pub start_minute: Option<i16>,
    pub end_minute: Option<i16>,
    pub description: Option<String>,
}

impl TryFrom<DbTimeEntry> for TimeEntry {
    type Error = eyre::Report;

    fn try_from(row: DbTimeEntry) -> Result<Self> {
        Ok(TimeEntry {
            id: row.id,
            worker_id: row.worker_id,
            date: row.date,
            hours: row.hours,
            start_time: row.start_minute.map(clock).transpose()?,
            end_time: row.end_minute.map(clock).transpose()?,
            description: row.description,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub department: String,
    pub role: String,
    pub worker_id: Option<Uuid>,
    pub password_hash: String,
    pub registered_at: DateTime<Utc>,
}

impl TryFrom<DbUser> for User {
    type Error = eyre::Report;

    fn try_from(row: DbUser) -> Result<Self> {
        Ok(User {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            position: row.position,
            department: row.department,
            role: row.role.parse()?,
            worker_id: row.worker_id,
            password_hash: row.password_hash,
            registered_at: row.registered_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_row_with_inverted_schedule_fails() {
        let row = DbWorker {
            id: Uuid::new_v4(),
            name: "Test".into(),
            email: "t@example.com".into(),
            phone: String::new(),
            position: String::new(),
            department: "Ops".into(),
            start_minute: 600,
            end_minute: 540,
            breaks: Json(vec![]),
            is_active: true,
        };
        assert!(Worker::try_from(row).is_err());
    }

    #[test]
    fn appointment_row_converts() {
        let row = DbAppointment {
            id: Uuid::new_v4(),
            worker_id: Uuid::new_v4(),
            worker_name: "Test".into(),
            department: "Ops".into(),
            date: "2024-01-15".parse().unwrap(),
            time_minute: 600,
            requested_by: "me".into(),
            reason: "why".into(),
            status: "confirmed".into(),
            created_at: Utc::now(),
        };
        let appointment = Appointment::try_from(row).unwrap();
        assert_eq!(appointment.time.to_string(), "10:00");
        assert_eq!(minutes(appointment.time), 600);
    }

    #[test]
    fn unknown_status_fails() {
        let row = DbAppointment {
            id: Uuid::new_v4(),
            worker_id: Uuid::new_v4(),
            worker_name: "Test".into(),
            department: "Ops".into(),
            date: "2024-01-15".parse().unwrap(),
            time_minute: 600,
            requested_by: "me".into(),
            reason: "why".into(),
            status: "archived".into(),
            created_at: Utc::now(),
        };
        assert!(Appointment::try_from(row).is_err());
    }
}
