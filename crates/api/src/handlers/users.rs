use axum::{
    extract::{Path, State},
    Json,
};
use slotbook_core::models::user::{Module, UpdateRoleRequest, UserProfile};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{
    middleware::{auth::CurrentUser, error_handling::AppError},
    ApiState,
};

/// Sets a user's role and the worker record they log time against.
#[axum::debug_handler]
pub async fn update_role(
    State(state): State<Arc<ApiState>>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRoleRequest>,
) -> Result<Json<UserProfile>, AppError> {
    current.require_module(Module::Admin)?;

    if let Some(worker_id) = payload.worker_id {
        state.store.get_worker(worker_id).await?;
    }

    let mut user = state.store.get_user(id).await?;
    user.role = payload.role;
    user.worker_id = payload.worker_id;
    let user = state.store.update_user(user).await?;

    info!(user_id = %id, role = %user.role, by = %current.0.id, "role updated");
    Ok(Json(UserProfile::from(&user)))
}
