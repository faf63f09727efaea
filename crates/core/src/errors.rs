use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Storage error: {0}")]
    Storage(#[from] eyre::Report),

    #[error("Internal error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl BookingError {
    /// The error a booking handler surfaces when a slot was taken between
    /// listing and committing.
    pub fn slot_taken(date: chrono::NaiveDate, time: crate::models::clock::ClockTime) -> Self {
        BookingError::Conflict(format!(
            "slot {date} {time} is no longer available, please reselect"
        ))
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
