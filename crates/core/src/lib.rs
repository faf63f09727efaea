//! # Slotbook Core
//!
//! Domain types and booking logic for the Slotbook appointment service.
//! Nothing in this crate performs I/O; persistence is reached through the
//! [`store::RecordStore`] trait.

pub mod booking;
pub mod errors;
pub mod report;
pub mod slots;
pub mod store;

pub mod models {
    pub mod appointment;
    pub mod clock;
    pub mod schedule;
    pub mod time_entry;
    pub mod user;
    pub mod worker;
}
