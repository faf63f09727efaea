//! Worker records and their free slots.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use slotbook_core::{
    models::{
        user::{Module, Role},
        worker::{SaveWorkerRequest, Worker},
    },
    slots::SlotListResponse,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{
    middleware::{auth::CurrentUser, error_handling::AppError},
    ApiState,
};

#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    pub date: NaiveDate,
}

#[axum::debug_handler]
pub async fn list_workers(
    State(state): State<Arc<ApiState>>,
    current: CurrentUser,
) -> Result<Json<Vec<Worker>>, AppError> {
    current.require_role(Role::User)?;
    let workers = state.store.list_workers().await?;
    Ok(Json(workers))
}

#[axum::debug_handler]
pub async fn get_worker(
    State(state): State<Arc<ApiState>>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Worker>, AppError> {
    current.require_role(Role::User)?;
    let worker = state.store.get_worker(id).await?;
    Ok(Json(worker))
}

#[axum::debug_handler]
pub async fn create_worker(
    State(state): State<Arc<ApiState>>,
    current: CurrentUser,
    Json(payload): Json<SaveWorkerRequest>,
) -> Result<(StatusCode, Json<Worker>), AppError> {
    current.require_module(Module::Admin)?;

    let worker = payload.into_worker(Uuid::new_v4())?;
    let worker = state.store.save_worker(worker).await?;
    info!(worker_id = %worker.id, "worker created");

    Ok((StatusCode::CREATED, Json(worker)))
}

#[axum::debug_handler]
pub async fn update_worker(
    State(state): State<Arc<ApiState>>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SaveWorkerRequest>,
) -> Result<Json<Worker>, AppError> {
    current.require_module(Module::Admin)?;

    // Saving is an upsert, so make sure the worker exists first
    state.store.get_worker(id).await?;
    let worker = state.store.save_worker(payload.into_worker(id)?).await?;
    info!(worker_id = %id, "worker updated");

    Ok(Json(worker))
}

#[axum::debug_handler]
pub async fn delete_worker(
    State(state): State<Arc<ApiState>>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    current.require_module(Module::Admin)?;
    state.store.delete_worker(id).await?;
    info!(worker_id = %id, "worker deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Free slots of a worker on the requested date.
#[axum::debug_handler]
pub async fn list_slots(
    State(state): State<Arc<ApiState>>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<SlotListResponse>, AppError> {
    current.require_module(Module::Appointments)?;
    let slots = state.bookings.available_slots(id, query.date).await?;
    Ok(Json(slots))
}
