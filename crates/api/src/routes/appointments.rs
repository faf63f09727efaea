use axum::{
    routing::{delete, get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/appointments",
            get(handlers::appointments::list_appointments)
                .post(handlers::appointments::create_appointment),
        )
        .route(
            "/api/appointments/:id",
            delete(handlers::appointments::delete_appointment),
        )
        .route(
            "/api/appointments/:id/status",
            put(handlers::appointments::update_status),
        )
        .route(
            "/api/appointments/:id/reschedule",
            put(handlers::appointments::reschedule),
        )
}
