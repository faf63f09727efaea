use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::schedule::WorkSchedule;
use crate::errors::{BookingError, BookingResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub department: String,
    pub schedule: WorkSchedule,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveWorkerRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub position: String,
    pub department: String,
    pub schedule: WorkSchedule,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl SaveWorkerRequest {
    pub fn validate(&self) -> BookingResult<()> {
        if self.name.trim().is_empty() {
            return Err(BookingError::Validation("worker name is required".to_string()));
        }
        if self.department.trim().is_empty() {
            return Err(BookingError::Validation(
                "worker department is required".to_string(),
            ));
        }
        if !self.email.contains('@') {
            return Err(BookingError::Validation(format!(
                "'{}' is not an email address",
                self.email
            )));
        }
        Ok(())
    }

    /// Validates and turns the request into a worker record with the given id.
    pub fn into_worker(self, id: Uuid) -> BookingResult<Worker> {
        self.validate()?;
        Ok(Worker {
            id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone,
            position: self.position,
            department: self.department.trim().to_string(),
            schedule: self.schedule,
            is_active: self.is_active,
        })
    }
}
