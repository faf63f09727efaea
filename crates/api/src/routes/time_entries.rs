use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/api/time-entries",
        get(handlers::time_entries::list_time_entries)
            .post(handlers::time_entries::create_time_entry),
    )
}
