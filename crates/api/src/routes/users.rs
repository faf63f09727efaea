use axum::{routing::put, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route("/api/users/:id/role", put(handlers::users::update_role))
}
