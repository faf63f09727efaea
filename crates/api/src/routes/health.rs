use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    workers: usize,
}

#[derive(Serialize)]
struct VersionResponse {
    name: &'static str,
    version: &'static str,
}

/// Reports `ok` once the record store answers a query.
async fn health_check(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<HealthResponse>, AppError> {
    let workers = state.store.list_workers().await?.len();
    Ok(Json(HealthResponse {
        status: "ok",
        workers,
    }))
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version))
}
