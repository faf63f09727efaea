use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/workers",
            get(handlers::workers::list_workers).post(handlers::workers::create_worker),
        )
        .route(
            "/api/workers/:id",
            get(handlers::workers::get_worker)
                .put(handlers::workers::update_worker)
                .delete(handlers::workers::delete_worker),
        )
        .route("/api/workers/:id/slots", get(handlers::workers::list_slots))
}
