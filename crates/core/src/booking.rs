//! # Booking Service
//!
//! Drives the slot engine against a [`RecordStore`]: lists free slots,
//! commits new appointments, and moves appointments through their status
//! lifecycle.
//!
//! Committing a booking is a read-then-write: the slot list a client saw may
//! be stale by the time it submits. `create_appointment` therefore re-reads
//! the worker's appointments and re-validates immediately before writing,
//! and the write itself goes through the store's conditional insert, which is
//! the final arbiter when two requests race.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    errors::{BookingError, BookingResult},
    models::{
        appointment::{
            Appointment, AppointmentFilter, AppointmentStatus, CreateAppointmentRequest,
            RescheduleRequest,
        },
        clock::ClockTime,
        worker::Worker,
    },
    slots::{SlotEngine, SlotListResponse},
    store::RecordStore,
};

#[derive(Clone)]
pub struct BookingService {
    store: Arc<dyn RecordStore>,
    engine: SlotEngine,
}

impl BookingService {
    pub fn new(store: Arc<dyn RecordStore>, engine: SlotEngine) -> Self {
        Self { store, engine }
    }

    /// Free slots of `worker_id` on `date`. Inactive workers offer none.
    pub async fn available_slots(
        &self,
        worker_id: Uuid,
        date: NaiveDate,
    ) -> BookingResult<SlotListResponse> {
        let worker = self.store.get_worker(worker_id).await?;

        let slots = if worker.is_active {
            let existing = self
                .store
                .get_appointments_for_worker_and_date(worker_id, date)
                .await?;
            self.engine.generate_slots(&worker.schedule, date, &existing)
        } else {
            debug!(%worker_id, "worker inactive, offering no slots");
            Vec::new()
        };

        Ok(SlotListResponse {
            worker_id,
            date,
            slot_minutes: self.engine.slot_minutes(),
            slots,
        })
    }

    /// Books a slot in `pending` status.
    ///
    /// Fails with `Validation` for a bad reason, an inactive worker, or a time
    /// that is not one of the worker's slots, and with `Conflict` when the
    /// slot is already held.
    pub async fn create_appointment(
        &self,
        request: CreateAppointmentRequest,
        requested_by: &str,
    ) -> BookingResult<Appointment> {
        request.validate()?;
        let worker = self.store.get_worker(request.worker_id).await?;

        let appointment = Appointment {
            id: Uuid::new_v4(),
            worker_id: worker.id,
            worker_name: worker.name.clone(),
            department: worker.department.clone(),
            date: request.date,
            time: request.time,
            requested_by: requested_by.to_string(),
            reason: request.reason.trim().to_string(),
            status: AppointmentStatus::Pending,
            created_at: Utc::now(),
        };

        self.commit(&worker, appointment).await
    }

    async fn commit(
        &self,
        worker: &Worker,
        appointment: Appointment,
    ) -> BookingResult<Appointment> {
        self.check_bookable(worker, appointment.time)?;

        let current = self
            .store
            .get_appointments_for_worker_and_date(worker.id, appointment.date)
            .await?;
        if let Err(err) =
            self.engine
                .validate_booking(worker.id, appointment.date, appointment.time, &current)
        {
            warn!(
                worker_id = %worker.id,
                date = %appointment.date,
                time = %appointment.time,
                "booking rejected, slot already held"
            );
            return Err(err);
        }

        let saved = self.store.insert_appointment_if_free(appointment).await?;
        info!(
            appointment_id = %saved.id,
            worker_id = %saved.worker_id,
            date = %saved.date,
            time = %saved.time,
            "appointment booked"
        );
        Ok(saved)
    }

    fn check_bookable(&self, worker: &Worker, time: ClockTime) -> BookingResult<()> {
        if !worker.is_active {
            return Err(BookingError::Validation(format!(
                "{} is not accepting appointments",
                worker.name
            )));
        }
        if !self.engine.is_on_grid(&worker.schedule, time) {
            return Err(BookingError::Validation(format!(
                "{time} is not a bookable slot for {}",
                worker.name
            )));
        }
        Ok(())
    }

    /// Applies a status change, rejecting transitions outside
    /// `pending -> confirmed -> cancelled` (and `pending -> cancelled`).
    pub async fn update_status(
        &self,
        id: Uuid,
        next: AppointmentStatus,
    ) -> BookingResult<Appointment> {
        let appointment = self.store.get_appointment(id).await?;
        let status = appointment.status.transition(next)?;
        let updated = self.store.set_appointment_status(id, status).await?;
        info!(
            appointment_id = %id,
            from = %appointment.status,
            to = %status,
            "appointment status changed"
        );
        Ok(updated)
    }

    /// Moves an appointment to a new date and time as cancel-and-recreate.
    ///
    /// The replacement is committed first, so if the new slot is taken the
    /// original appointment is left as it was. If the original cannot be
    /// cancelled afterwards, the replacement is cancelled again so that only
    /// one live appointment remains.
    pub async fn reschedule(
        &self,
        id: Uuid,
        request: RescheduleRequest,
    ) -> BookingResult<Appointment> {
        let original = self.store.get_appointment(id).await?;
        original.status.transition(AppointmentStatus::Cancelled)?;

        if original.date == request.date && original.time == request.time {
            return Err(BookingError::Validation(
                "appointment is already at that date and time".to_string(),
            ));
        }

        let worker = self.store.get_worker(original.worker_id).await?;
        let replacement = Appointment {
            id: Uuid::new_v4(),
            worker_name: worker.name.clone(),
            department: worker.department.clone(),
            date: request.date,
            time: request.time,
            status: AppointmentStatus::Pending,
            created_at: Utc::now(),
            ..original.clone()
        };

        let saved = self.commit(&worker, replacement).await?;
        if let Err(err) = self
            .store
            .set_appointment_status(original.id, AppointmentStatus::Cancelled)
            .await
        {
            warn!(
                from = %original.id,
                to = %saved.id,
                %err,
                "reschedule failed, releasing new slot"
            );
            if let Err(undo) = self
                .store
                .set_appointment_status(saved.id, AppointmentStatus::Cancelled)
                .await
            {
                warn!(appointment_id = %saved.id, err = %undo, "could not release new slot");
            }
            return Err(err);
        }
        info!(from = %original.id, to = %saved.id, "appointment rescheduled");
        Ok(saved)
    }

    pub async fn list_appointments(
        &self,
        filter: &AppointmentFilter,
    ) -> BookingResult<Vec<Appointment>> {
        let all = self.store.list_appointments().await?;
        Ok(filter.apply(all))
    }

    pub async fn delete_appointment(&self, id: Uuid) -> BookingResult<()> {
        self.store.delete_appointment(id).await?;
        info!(appointment_id = %id, "appointment deleted");
        Ok(())
    }
}
