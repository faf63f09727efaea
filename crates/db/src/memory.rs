//! In-process [`RecordStore`] holding each collection as an ordered list,
//! the way the application keeps its local key-value data. Insertion order is
//! preserved for listings.
//!
//! All access goes through one `RwLock`, so the conditional appointment insert
//! checks and writes under a single write guard.

use async_trait::async_trait;
use chrono::NaiveDate;
use slotbook_core::{
    errors::{BookingError, BookingResult},
    models::{
        appointment::{Appointment, AppointmentStatus},
        time_entry::TimeEntry,
        user::User,
        worker::Worker,
    },
    store::RecordStore,
};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Default, Clone)]
pub struct Collections {
    pub workers: Vec<Worker>,
    pub appointments: Vec<Appointment>,
    pub time_entries: Vec<TimeEntry>,
    pub users: Vec<User>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collections(collections: Collections) -> Self {
        Self {
            data: RwLock::new(collections),
        }
    }

    /// A store pre-populated with sample workers, appointments and time entries.
    pub fn seeded() -> BookingResult<Self> {
        Ok(Self::with_collections(crate::seed::default_collections()?))
    }

    pub async fn snapshot(&self) -> Collections {
        self.data.read().await.clone()
    }
}

fn worker_not_found(id: Uuid) -> BookingError {
    BookingError::NotFound(format!("Worker with ID {id} not found"))
}

fn appointment_not_found(id: Uuid) -> BookingError {
    BookingError::NotFound(format!("Appointment with ID {id} not found"))
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_workers(&self) -> BookingResult<Vec<Worker>> {
        Ok(self.data.read().await.workers.clone())
    }

    async fn get_worker(&self, id: Uuid) -> BookingResult<Worker> {
        self.data
            .read()
            .await
            .workers
            .iter()
            .find(|w| w.id == id)
            .cloned()
            .ok_or_else(|| worker_not_found(id))
    }

    async fn save_worker(&self, worker: Worker) -> BookingResult<Worker> {
        let mut data = self.data.write().await;
        match data.workers.iter_mut().find(|w| w.id == worker.id) {
            Some(existing) => *existing = worker.clone(),
            None => data.workers.push(worker.clone()),
        }
        debug!(worker_id = %worker.id, "worker saved");
        Ok(worker)
    }

    async fn delete_worker(&self, id: Uuid) -> BookingResult<()> {
        let mut data = self.data.write().await;
        let before = data.workers.len();
        data.workers.retain(|w| w.id != id);
        if data.workers.len() == before {
            return Err(worker_not_found(id));
        }
        debug!(worker_id = %id, "worker deleted");
        Ok(())
    }

    async fn list_appointments(&self) -> BookingResult<Vec<Appointment>> {
        Ok(self.data.read().await.appointments.clone())
    }

    async fn get_appointment(&self, id: Uuid) -> BookingResult<Appointment> {
        self.data
            .read()
            .await
            .appointments
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| appointment_not_found(id))
    }

    async fn get_appointments_for_worker_and_date(
        &self,
        worker_id: Uuid,
        date: NaiveDate,
    ) -> BookingResult<Vec<Appointment>> {
        Ok(self
            .data
            .read()
            .await
            .appointments
            .iter()
            .filter(|a| a.worker_id == worker_id && a.date == date)
            .cloned()
            .collect())
    }

    async fn insert_appointment_if_free(
        &self,
        appointment: Appointment,
    ) -> BookingResult<Appointment> {
        let mut data = self.data.write().await;
        let taken = data
            .appointments
            .iter()
            .any(|a| a.occupies(appointment.worker_id, appointment.date, appointment.time));
        if taken {
            return Err(BookingError::slot_taken(appointment.date, appointment.time));
        }
        data.appointments.push(appointment.clone());
        debug!(appointment_id = %appointment.id, "appointment inserted");
        Ok(appointment)
    }

    async fn set_appointment_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> BookingResult<Appointment> {
        let mut data = self.data.write().await;
        let appointment = data
            .appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| appointment_not_found(id))?;
        appointment.status = status;
        Ok(appointment.clone())
    }

    async fn delete_appointment(&self, id: Uuid) -> BookingResult<()> {
        let mut data = self.data.write().await;
        let before = data.appointments.len();
        data.appointments.retain(|a| a.id != id);
        if data.appointments.len() == before {
            return Err(appointment_not_found(id));
        }
        Ok(())
    }

    async fn list_time_entries(&self) -> BookingResult<Vec<TimeEntry>> {
        Ok(self.data.read().await.time_entries.clone())
    }

    async fn time_entries_for_worker(&self, worker_id: Uuid) -> BookingResult<Vec<TimeEntry>> {
        Ok(self
            .data
            .read()
            .await
            .time_entries
            .iter()
            .filter(|e| e.worker_id == worker_id)
            .cloned()
            .collect())
    }

    async fn insert_time_entry(&self, entry: TimeEntry) -> BookingResult<TimeEntry> {
        self.data.write().await.time_entries.push(entry.clone());
        Ok(entry)
    }

    async fn get_user(&self, id: Uuid) -> BookingResult<User> {
        self.data
            .read()
            .await
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| BookingError::NotFound(format!("User with ID {id} not found")))
    }

    async fn find_user_by_email(&self, email: &str) -> BookingResult<Option<User>> {
        Ok(self
            .data
            .read()
            .await
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn insert_user(&self, user: User) -> BookingResult<User> {
        let mut data = self.data.write().await;
        if data.users.iter().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(BookingError::Conflict(format!(
                "{} is already registered",
                user.email
            )));
        }
        data.users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, user: User) -> BookingResult<User> {
        let mut data = self.data.write().await;
        let existing = data
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| BookingError::NotFound(format!("User with ID {} not found", user.id)))?;
        *existing = user.clone();
        Ok(user)
    }
}
