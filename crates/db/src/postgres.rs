//! PostgreSQL-backed [`RecordStore`].

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
use uuid::Uuid;

use crate::{repositories, DbPool};

pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

fn convert<R, T>(rows: Vec<R>) -> BookingResult<Vec<T>>
where
    T: TryFrom<R, Error = eyre::Report>,
{
    rows.into_iter()
        .map(|row| T::try_from(row).map_err(BookingError::Storage))
        .collect()
}

#[async_trait]
impl RecordStore for PgStore {
    async fn list_workers(&self) -> BookingResult<Vec<Worker>> {
        convert(repositories::worker::list_workers(&self.pool).await?)
    }

    async fn get_worker(&self, id: Uuid) -> BookingResult<Worker> {
        let row = repositories::worker::get_worker_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| BookingError::NotFound(format!("Worker with ID {id} not found")))?;
        Ok(Worker::try_from(row)?)
    }

    async fn save_worker(&self, worker: Worker) -> BookingResult<Worker> {
        let row = repositories::worker::upsert_worker(&self.pool, &worker).await?;
        Ok(Worker::try_from(row)?)
    }

    async fn delete_worker(&self, id: Uuid) -> BookingResult<()> {
        if !repositories::worker::delete_worker(&self.pool, id).await? {
            return Err(BookingError::NotFound(format!("Worker with ID {id} not found")));
        }
        Ok(())
    }

    async fn list_appointments(&self) -> BookingResult<Vec<Appointment>> {
        convert(repositories::appointment::list_appointments(&self.pool).await?)
    }

    async fn get_appointment(&self, id: Uuid) -> BookingResult<Appointment> {
        let row = repositories::appointment::get_appointment_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| {
                BookingError::NotFound(format!("Appointment with ID {id} not found"))
            })?;
        Ok(Appointment::try_from(row)?)
    }

    async fn get_appointments_for_worker_and_date(
        &self,
        worker_id: Uuid,
        date: NaiveDate,
    ) -> BookingResult<Vec<Appointment>> {
        convert(
            repositories::appointment::get_appointments_by_worker_and_date(
                &self.pool, worker_id, date,
            )
            .await?,
        )
    }

    async fn insert_appointment_if_free(
        &self,
        appointment: Appointment,
    ) -> BookingResult<Appointment> {
        match repositories::appointment::insert_appointment_if_free(&self.pool, &appointment)
            .await?
        {
            Some(row) => Ok(Appointment::try_from(row)?),
            None => Err(BookingError::slot_taken(appointment.date, appointment.time)),
        }
    }

    async fn set_appointment_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> BookingResult<Appointment> {
        let row = repositories::appointment::update_appointment_status(&self.pool, id, status)
            .await?
            .ok_or_else(|| {
                BookingError::NotFound(format!("Appointment with ID {id} not found"))
            })?;
        Ok(Appointment::try_from(row)?)
    }

    async fn delete_appointment(&self, id: Uuid) -> BookingResult<()> {
        if !repositories::appointment::delete_appointment(&self.pool, id).await? {
            return Err(BookingError::NotFound(format!(
                "Appointment with ID {id} not found"
            )));
        }
        Ok(())
    }

    async fn list_time_entries(&self) -> BookingResult<Vec<TimeEntry>> {
        convert(repositories::time_entry::list_time_entries(&self.pool).await?)
    }

    async fn time_entries_for_worker(&self, worker_id: Uuid) -> BookingResult<Vec<TimeEntry>> {
        convert(
            repositories::time_entry::get_time_entries_by_worker_id(&self.pool, worker_id).await?,
        )
    }

    async fn insert_time_entry(&self, entry: TimeEntry) -> BookingResult<TimeEntry> {
        let row = repositories::time_entry::create_time_entry(&self.pool, &entry).await?;
        Ok(TimeEntry::try_from(row)?)
    }

    async fn get_user(&self, id: Uuid) -> BookingResult<User> {
        let row = repositories::user::get_user_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| BookingError::NotFound(format!("User with ID {id} not found")))?;
        Ok(User::try_from(row)?)
    }

    async fn find_user_by_email(&self, email: &str) -> BookingResult<Option<User>> {
        repositories::user::get_user_by_email(&self.pool, email)
            .await?
            .map(User::try_from)
            .transpose()
            .map_err(BookingError::Storage)
    }

    async fn insert_user(&self, user: User) -> BookingResult<User> {
        match repositories::user::create_user(&self.pool, &user).await? {
            Some(row) => Ok(User::try_from(row)?),
            None => Err(BookingError::Conflict(format!(
                "{} is already registered",
                user.email
            ))),
        }
    }

    async fn update_user(&self, user: User) -> BookingResult<User> {
        let row = repositories::user::update_user(&self.pool, &user)
            .await?
            .ok_or_else(|| {
                BookingError::NotFound(format!("User with ID {} not found", user.id))
            })?;
        Ok(User::try_from(row)?)
    }
}
