use axum::{extract::State, http::StatusCode, Json};
use slotbook_core::{
    errors::BookingError,
    models::{
        time_entry::{CreateTimeEntryRequest, TimeEntry},
        user::Module,
    },
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{
    middleware::{auth::CurrentUser, error_handling::AppError},
    ApiState,
};

/// Admins see every entry; workers see those of their linked worker record.
#[axum::debug_handler]
pub async fn list_time_entries(
    State(state): State<Arc<ApiState>>,
    current: CurrentUser,
) -> Result<Json<Vec<TimeEntry>>, AppError> {
    current.require_module(Module::TimeTracking)?;

    let entries = if current.is_admin() {
        state.store.list_time_entries().await?
    } else {
        match current.0.worker_id {
            Some(worker_id) => state.store.time_entries_for_worker(worker_id).await?,
            None => Vec::new(),
        }
    };

    Ok(Json(entries))
}

#[axum::debug_handler]
pub async fn create_time_entry(
    State(state): State<Arc<ApiState>>,
    current: CurrentUser,
    Json(payload): Json<CreateTimeEntryRequest>,
) -> Result<(StatusCode, Json<TimeEntry>), AppError> {
    current.require_module(Module::TimeTracking)?;

    if !current.is_admin() && current.0.worker_id != Some(payload.worker_id) {
        return Err(BookingError::Authorization(
            "time can only be recorded against your own worker record".to_string(),
        )
        .into());
    }

    state.store.get_worker(payload.worker_id).await?;
    let entry = payload.into_entry(Uuid::new_v4())?;
    let entry = state.store.insert_time_entry(entry).await?;
    info!(entry_id = %entry.id, worker_id = %entry.worker_id, hours = entry.hours, "time recorded");

    Ok((StatusCode::CREATED, Json(entry)))
}
