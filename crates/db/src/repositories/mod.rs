pub mod appointment;
pub mod time_entry;
pub mod user;
pub mod worker;
