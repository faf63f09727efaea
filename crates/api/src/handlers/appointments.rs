//! Appointment booking and lifecycle.
//!
//! Booking and status changes go through [`BookingService`], which owns the
//! slot checks and transition rules. Handlers only decide who may act.
//!
//! [`BookingService`]: slotbook_core::booking::BookingService

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use slotbook_core::{
    errors::BookingError,
    models::{
        appointment::{
            Appointment, AppointmentFilter, CreateAppointmentRequest, RescheduleRequest,
            UpdateStatusRequest,
        },
        user::{Module, Role},
    },
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    middleware::{auth::CurrentUser, error_handling::AppError},
    ApiState,
};

/// Lists appointments matching the query filter, most recent first.
#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<ApiState>>,
    current: CurrentUser,
    Query(filter): Query<AppointmentFilter>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    current.require_role(Role::Worker)?;
    let appointments = state.bookings.list_appointments(&filter).await?;
    Ok(Json(appointments))
}

/// Books a slot on behalf of the current user.
///
/// # Returns
///
/// * `201` with the pending appointment
/// * `409` when the slot was taken since it was listed
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    current: CurrentUser,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    current.require_module(Module::Appointments)?;
    let appointment = state
        .bookings
        .create_appointment(payload, &current.0.email)
        .await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

#[axum::debug_handler]
pub async fn update_status(
    State(state): State<Arc<ApiState>>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<Appointment>, AppError> {
    current.require_role(Role::Worker)?;
    let appointment = state.bookings.update_status(id, payload.status).await?;
    Ok(Json(appointment))
}

/// Moves an appointment. Plain users may only move their own bookings.
#[axum::debug_handler]
pub async fn reschedule(
    State(state): State<Arc<ApiState>>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RescheduleRequest>,
) -> Result<Json<Appointment>, AppError> {
    current.require_module(Module::Appointments)?;

    if !current.0.role.includes(Role::Worker) {
        let existing = state.store.get_appointment(id).await?;
        if !existing.requested_by.eq_ignore_ascii_case(&current.0.email) {
            return Err(BookingError::Authorization(
                "only the requester can reschedule this appointment".to_string(),
            )
            .into());
        }
    }

    let appointment = state.bookings.reschedule(id, payload).await?;
    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<Arc<ApiState>>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    current.require_module(Module::Admin)?;
    state.bookings.delete_appointment(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
