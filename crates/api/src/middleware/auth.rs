//! # Authentication Module
//!
//! This module provides authentication-related utilities for the Slotbook API:
//! password hashing and verification for user accounts, and the
//! [`CurrentUser`] extractor that resolves the acting account of a request.
//!
//! Requests identify their user with the `x-user-id` header carrying the
//! account id returned at login.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use eyre::Result;
use slotbook_core::{
    errors::{BookingError, BookingResult},
    models::user::{Module, Role, User},
};
use tracing::debug;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

/// Header naming the account a request acts as
pub const USER_ID_HEADER: &str = "x-user-id";

/// Hashes a password using the Argon2 algorithm
///
/// # Arguments
///
/// * `password` - The plain text password to hash
///
/// # Returns
///
/// * `Result<String>` - The hashed password in PHC string format, or an error
///
/// # Example
///
/// ```rust
/// use slotbook_api::middleware::auth::hash_password;
///
/// let hashed = hash_password("correct horse").unwrap();
/// assert!(hashed.starts_with("$argon2"));
/// ```
pub fn hash_password(password: &str) -> Result<String> {
    // Generate a fresh, random salt
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Verifies a password against a stored Argon2 hash
///
/// # Arguments
///
/// * `password` - Plain text password to verify
/// * `password_hash` - Stored hash in PHC string format
///
/// # Returns
///
/// * `Result<bool>` - True if password matches, false otherwise. Fails only
///   when the stored hash cannot be parsed.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| eyre::eyre!("Stored password hash is malformed: {}", e))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// The account a request acts as, resolved from [`USER_ID_HEADER`].
///
/// Rejects with `401` when the header is missing, is not a UUID, or names an
/// unknown account.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    /// Fails with `Authorization` unless the user's role includes `role`.
    pub fn require_role(&self, role: Role) -> BookingResult<()> {
        if self.0.role.includes(role) {
            Ok(())
        } else {
            Err(BookingError::Authorization(format!(
                "{} role required",
                role
            )))
        }
    }

    pub fn require_module(&self, module: Module) -> BookingResult<()> {
        self.0.require_module(module)
    }

    pub fn is_admin(&self) -> bool {
        self.0.role.includes(Role::Admin)
    }
}

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                BookingError::Authentication(format!("missing {USER_ID_HEADER} header"))
            })?;

        let id = Uuid::parse_str(raw.trim()).map_err(|_| {
            BookingError::Authentication(format!("{USER_ID_HEADER} is not a valid id"))
        })?;

        let user = match state.store.get_user(id).await {
            Ok(user) => user,
            Err(BookingError::NotFound(_)) => {
                debug!(user_id = %id, "request for unknown user");
                return Err(BookingError::Authentication("unknown user".to_string()).into());
            }
            Err(err) => return Err(err.into()),
        };

        Ok(CurrentUser(user))
    }
}
