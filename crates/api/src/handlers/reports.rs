use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use slotbook_core::{
    models::user::Module,
    report::{DateRange, ReportSummary},
};
use std::sync::Arc;

use crate::{
    middleware::{auth::CurrentUser, error_handling::AppError},
    ApiState,
};

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Staff, appointment and hours summary for an inclusive date range.
#[axum::debug_handler]
pub async fn summary(
    State(state): State<Arc<ApiState>>,
    current: CurrentUser,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ReportSummary>, AppError> {
    current.require_module(Module::Admin)?;

    let range = DateRange::new(query.start, query.end)?;
    let workers = state.store.list_workers().await?;
    let appointments = state.store.list_appointments().await?;
    let entries = state.store.list_time_entries().await?;

    Ok(Json(ReportSummary::build(
        range,
        &workers,
        &appointments,
        &entries,
    )))
}
