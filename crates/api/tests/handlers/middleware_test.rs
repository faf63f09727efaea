use std::sync::Arc;

use axum::http::StatusCode;
use eyre::eyre;
use mockall::predicate::eq;
use rstest::rstest;
use slotbook_api::{build_router, middleware::error_handling::map_error, ApiState};
use slotbook_core::{errors::BookingError, slots::SlotEngine};
use slotbook_db::mock::MockStore;
use uuid::Uuid;

#[rstest]
#[case::not_found(BookingError::NotFound("gone".into()), StatusCode::NOT_FOUND)]
#[case::invalid_schedule(BookingError::InvalidSchedule("inverted".into()), StatusCode::BAD_REQUEST)]
#[case::validation(BookingError::Validation("bad".into()), StatusCode::BAD_REQUEST)]
#[case::conflict(BookingError::Conflict("taken".into()), StatusCode::CONFLICT)]
#[case::authentication(BookingError::Authentication("who".into()), StatusCode::UNAUTHORIZED)]
#[case::authorization(BookingError::Authorization("no".into()), StatusCode::FORBIDDEN)]
#[case::storage(BookingError::Storage(eyre!("disk")), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: BookingError, #[case] expected: StatusCode) {
    let response = map_error(error);
    assert_eq!(response.status(), expected);
}

#[tokio::test]
async fn test_error_handling_internal() {
    let error = BookingError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));

    let response = map_error(error);

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test_log::test(tokio::test)]
async fn test_store_failure_during_identity_lookup_is_server_error() {
    let id = Uuid::new_v4();
    let mut store = MockStore::new();
    store
        .expect_get_user()
        .with(eq(id))
        .times(1)
        .returning(|_| Err(BookingError::Storage(eyre!("connection refused"))));

    let state = Arc::new(ApiState::new(Arc::new(store), SlotEngine::default()));
    let server = axum_test::TestServer::new(build_router(state)).unwrap();

    let response = server
        .get("/api/workers")
        .add_header(
            axum::http::HeaderName::from_static("x-user-id"),
            axum::http::HeaderValue::from_str(&id.to_string()).unwrap(),
        )
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<serde_json::Value>();
    assert!(body["error"].as_str().unwrap().contains("connection refused"));
}

#[test_log::test(tokio::test)]
async fn test_health_reports_store_status() {
    let mut store = MockStore::new();
    store.expect_list_workers().returning(|| Ok(Vec::new()));

    let state = Arc::new(ApiState::new(Arc::new(store), SlotEngine::default()));
    let server = axum_test::TestServer::new(build_router(state)).unwrap();

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<serde_json::Value>()["status"], "ok");
}
