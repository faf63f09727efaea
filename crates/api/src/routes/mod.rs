pub mod appointments;
pub mod auth;
pub mod health;
pub mod reports;
pub mod time_entries;
pub mod users;
pub mod workers;
