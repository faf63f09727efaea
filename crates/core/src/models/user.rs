use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};

/// Static three-tier hierarchy: every admin is a worker, every worker a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Worker,
    Admin,
}

/// Areas of the application gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Module {
    Dashboard,
    Profile,
    Appointments,
    TimeTracking,
    Admin,
}

impl Role {
    /// Whether a holder of `self` also holds `required`.
    pub fn includes(self, required: Role) -> bool {
        self >= required
    }

    pub fn modules(self) -> &'static [Module] {
        use Module::*;
        match self {
            Role::User => &[Dashboard, Profile, Appointments],
            Role::Worker => &[Dashboard, Profile, Appointments, TimeTracking],
            Role::Admin => &[Dashboard, Profile, Appointments, TimeTracking, Admin],
        }
    }

    pub fn can_access(self, module: Module) -> bool {
        self.modules().contains(&module)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Worker => "worker",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "worker" => Ok(Role::Worker),
            "admin" => Ok(Role::Admin),
            other => Err(BookingError::Validation(format!("unknown role '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub department: String,
    pub role: Role,
    /// Worker record this account logs time against, if any.
    pub worker_id: Option<Uuid>,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub registered_at: DateTime<Utc>,
}

impl User {
    pub fn require_module(&self, module: Module) -> BookingResult<()> {
        if self.role.can_access(module) {
            Ok(())
        } else {
            Err(BookingError::Authorization(format!(
                "role {} cannot access {module:?}",
                self.role
            )))
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub department: String,
    pub password: String,
}

pub const MIN_PASSWORD_CHARS: usize = 8;

impl RegisterRequest {
    pub fn validate(&self) -> BookingResult<()> {
        if self.first_name.trim().is_empty() {
            return Err(BookingError::Validation("first name is required".to_string()));
        }
        if !self.email.contains('@') {
            return Err(BookingError::Validation(format!(
                "'{}' is not an email address",
                self.email
            )));
        }
        if self.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(BookingError::Validation(format!(
                "password must be at least {MIN_PASSWORD_CHARS} characters"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Role,
    pub worker_id: Option<Uuid>,
}

/// What a client sees of an account: no credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub worker_id: Option<Uuid>,
    pub modules: Vec<Module>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            role: user.role,
            worker_id: user.worker_id,
            modules: user.role.modules().to_vec(),
        }
    }
}
