//! Account registration and login.
//!
//! Registration always creates a plain `user`; elevated roles are granted
//! afterwards through the role endpoint or the bootstrap admin.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use eyre::Result;
use slotbook_core::{
    errors::{BookingError, BookingResult},
    models::user::{LoginRequest, RegisterRequest, Role, User, UserProfile},
    store::RecordStore,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{
    config::AdminCredentials,
    middleware::{auth, error_handling::AppError},
    ApiState,
};

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserProfile>), AppError> {
    payload.validate()?;

    let user = User {
        id: Uuid::new_v4(),
        first_name: payload.first_name.trim().to_string(),
        last_name: payload.last_name.trim().to_string(),
        email: normalize_email(&payload.email),
        phone: payload.phone,
        position: payload.position,
        department: payload.department,
        role: Role::User,
        worker_id: None,
        password_hash: auth::hash_password(&payload.password)?,
        registered_at: Utc::now(),
    };

    let user = state.store.insert_user(user).await?;
    info!(user_id = %user.id, "user registered");

    Ok((StatusCode::CREATED, Json(UserProfile::from(&user))))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let rejected = || BookingError::Authentication("invalid email or password".to_string());

    let user = state
        .store
        .find_user_by_email(&normalize_email(&payload.email))
        .await?
        .ok_or_else(rejected)?;

    if !auth::verify_password(&payload.password, &user.password_hash)? {
        return Err(rejected().into());
    }

    Ok(Json(UserProfile::from(&user)))
}

/// Creates the configured administrator unless an account with that email
/// already exists.
pub async fn ensure_admin(store: &dyn RecordStore, admin: &AdminCredentials) -> BookingResult<()> {
    let email = normalize_email(&admin.email);
    if store.find_user_by_email(&email).await?.is_some() {
        return Ok(());
    }

    let user = User {
        id: Uuid::new_v4(),
        first_name: "Administrator".to_string(),
        last_name: String::new(),
        email,
        phone: String::new(),
        position: String::new(),
        department: String::new(),
        role: Role::Admin,
        worker_id: None,
        password_hash: auth::hash_password(&admin.password)?,
        registered_at: Utc::now(),
    };
    let user = store.insert_user(user).await?;
    info!(user_id = %user.id, "bootstrap admin created");
    Ok(())
}
