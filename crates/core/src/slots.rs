//! # Slot Engine
//!
//! Computes the bookable time slots of one worker on one date and checks a
//! candidate booking against the appointments already held.
//!
//! ## Slot Generation
//!
//! Slots are laid on a fixed grid that starts at the schedule's start time and
//! advances by the slot length:
//!
//! 1. A slot must end at or before the end of the work window. A trailing
//!    partial slot is never offered.
//! 2. A slot whose *start* falls inside a break is dropped, even if it would
//!    end before the break. Breaks are tested at slot-start granularity only.
//! 3. A slot whose start equals the time of a non-cancelled appointment on the
//!    same date is dropped.
//!
//! Generation is a pure function of its inputs: the same schedule, date and
//! appointments always give the same slots, in ascending order.

use std::num::NonZeroU16;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{BookingError, BookingResult},
    models::{appointment::Appointment, clock::ClockTime, schedule::WorkSchedule},
};

pub const DEFAULT_SLOT_MINUTES: u16 = 30;

/// A bookable start time for a specific worker and date. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub time: ClockTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotListResponse {
    pub worker_id: Uuid,
    pub date: NaiveDate,
    pub slot_minutes: u16,
    pub slots: Vec<Slot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotEngine {
    slot_minutes: NonZeroU16,
}

impl Default for SlotEngine {
    fn default() -> Self {
        Self {
            slot_minutes: NonZeroU16::new(DEFAULT_SLOT_MINUTES).unwrap_or(NonZeroU16::MIN),
        }
    }
}

/// Every slot start the schedule offers before appointments are taken into
/// account.
fn grid(step: u16, schedule: &WorkSchedule) -> impl Iterator<Item = ClockTime> + '_ {
    let end = u32::from(schedule.end().minutes());
    (schedule.start().minutes()..schedule.end().minutes())
        .step_by(usize::from(step))
        .take_while(move |t| u32::from(*t) + u32::from(step) <= end)
        .filter_map(|t| ClockTime::from_minutes(t).ok())
        .filter(move |t| !schedule.is_during_break(*t))
}

impl SlotEngine {
    pub fn new(slot_minutes: u16) -> BookingResult<Self> {
        let slot_minutes = NonZeroU16::new(slot_minutes).ok_or_else(|| {
            BookingError::Validation("slot length must be at least one minute".to_string())
        })?;
        Ok(Self { slot_minutes })
    }

    pub fn slot_minutes(&self) -> u16 {
        self.slot_minutes.get()
    }

    /// Bookable slots for `date`, ascending.
    ///
    /// `existing` is expected to be the worker's own appointments. Entries on
    /// other dates and cancelled entries are ignored.
    pub fn generate_slots(
        &self,
        schedule: &WorkSchedule,
        date: NaiveDate,
        existing: &[Appointment],
    ) -> Vec<Slot> {
        let taken: Vec<ClockTime> = existing
            .iter()
            .filter(|a| a.date == date && a.status.is_active())
            .map(|a| a.time)
            .collect();

        let slots: Vec<Slot> = grid(self.slot_minutes(), schedule)
            .filter(|t| !taken.contains(t))
            .map(|time| Slot { time })
            .collect();

        tracing::debug!(
            %date,
            slot_minutes = self.slot_minutes(),
            taken = taken.len(),
            offered = slots.len(),
            "generated slots"
        );
        slots
    }

    /// Whether `time` is a slot this schedule could ever offer, ignoring
    /// appointments.
    pub fn is_on_grid(&self, schedule: &WorkSchedule, time: ClockTime) -> bool {
        let Some(offset) = time.minutes_since(schedule.start()) else {
            return false;
        };
        let step = self.slot_minutes.get();
        offset % step == 0
            && u32::from(time.minutes()) + u32::from(step) <= u32::from(schedule.end().minutes())
            && !schedule.is_during_break(time)
    }

    /// Rejects the booking with `Conflict` if a non-cancelled appointment of
    /// `worker_id` already holds `(date, time)`.
    ///
    /// Must be run against a fresh read of the appointments, not the list the
    /// slots were rendered from.
    pub fn validate_booking(
        &self,
        worker_id: Uuid,
        date: NaiveDate,
        time: ClockTime,
        existing: &[Appointment],
    ) -> BookingResult<()> {
        if existing.iter().any(|a| a.occupies(worker_id, date, time)) {
            return Err(BookingError::slot_taken(date, time));
        }
        Ok(())
    }
}
