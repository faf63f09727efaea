//! # Record Store
//!
//! The persistence contract the booking logic is written against. Records are
//! grouped into four collections: workers, appointments, time entries and
//! users. Implementations live in the `slotbook-db` crate.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    errors::BookingResult,
    models::{
        appointment::{Appointment, AppointmentStatus},
        schedule::WorkSchedule,
        time_entry::TimeEntry,
        user::User,
        worker::Worker,
    },
};

#[async_trait]
pub trait RecordStore: Send + Sync {
    // Workers

    async fn list_workers(&self) -> BookingResult<Vec<Worker>>;

    /// Fails with `NotFound` if the id is unknown.
    async fn get_worker(&self, id: Uuid) -> BookingResult<Worker>;

    async fn get_worker_schedule(&self, id: Uuid) -> BookingResult<WorkSchedule> {
        Ok(self.get_worker(id).await?.schedule)
    }

    /// Inserts the worker, or replaces the record with the same id.
    async fn save_worker(&self, worker: Worker) -> BookingResult<Worker>;

    /// Fails with `NotFound` if the id is unknown.
    async fn delete_worker(&self, id: Uuid) -> BookingResult<()>;

    // Appointments

    async fn list_appointments(&self) -> BookingResult<Vec<Appointment>>;

    async fn get_appointment(&self, id: Uuid) -> BookingResult<Appointment>;

    async fn get_appointments_for_worker_and_date(
        &self,
        worker_id: Uuid,
        date: NaiveDate,
    ) -> BookingResult<Vec<Appointment>>;

    /// Inserts `appointment` only if no non-cancelled appointment holds the
    /// same `(worker_id, date, time)`; otherwise fails with `Conflict`.
    ///
    /// The check and the insert must be atomic with respect to other callers.
    async fn insert_appointment_if_free(&self, appointment: Appointment)
    -> BookingResult<Appointment>;

    /// Overwrites the status. Transition rules are enforced by the caller.
    async fn set_appointment_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> BookingResult<Appointment>;

    async fn delete_appointment(&self, id: Uuid) -> BookingResult<()>;

    // Time entries

    async fn list_time_entries(&self) -> BookingResult<Vec<TimeEntry>>;

    async fn time_entries_for_worker(&self, worker_id: Uuid) -> BookingResult<Vec<TimeEntry>>;

    async fn insert_time_entry(&self, entry: TimeEntry) -> BookingResult<TimeEntry>;

    // Users

    async fn get_user(&self, id: Uuid) -> BookingResult<User>;

    async fn find_user_by_email(&self, email: &str) -> BookingResult<Option<User>>;

    /// Fails with `Conflict` if the email is already registered.
    async fn insert_user(&self, user: User) -> BookingResult<User>;

    async fn update_user(&self, user: User) -> BookingResult<User>;
}
