use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use slotbook_core::{models::worker::Worker, slots::SlotListResponse};

use crate::test_utils::{as_user, day, TestContext};

fn new_worker() -> Value {
    json!({
        "name": "Hugo Prieto",
        "email": "hugo.prieto@example.com",
        "department": "Legal",
        "schedule": {
            "start": "14:00",
            "end": "16:00",
            "breaks": [{ "start": "15:00", "end": "15:15" }],
        },
    })
}

#[test_log::test(tokio::test)]
async fn test_admin_creates_and_user_reads_worker() {
    let ctx = TestContext::new().await;

    let denied = as_user(ctx.server.post("/api/workers"), &ctx.staff)
        .json(&new_worker())
        .await;
    assert_eq!(denied.status_code(), StatusCode::FORBIDDEN);

    let created = as_user(ctx.server.post("/api/workers"), &ctx.admin)
        .json(&new_worker())
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);
    let worker = created.json::<Worker>();
    assert!(worker.is_active);

    let fetched = as_user(
        ctx.server.get(&format!("/api/workers/{}", worker.id)),
        &ctx.client,
    )
    .await;
    assert_eq!(fetched.json::<Worker>(), worker);

    let all = as_user(ctx.server.get("/api/workers"), &ctx.client).await;
    assert_eq!(all.json::<Vec<Worker>>().len(), 2);

    let slots = as_user(
        ctx.server.get(&format!("/api/workers/{}/slots", worker.id)),
        &ctx.client,
    )
    .add_query_param("date", day().to_string())
    .await;
    let times: Vec<String> = slots
        .json::<SlotListResponse>()
        .slots
        .iter()
        .map(|s| s.time.to_string())
        .collect();
    assert_eq!(times, vec!["14:00", "14:30", "15:30"]);
}

#[test_log::test(tokio::test)]
async fn test_invalid_schedule_is_unprocessable() {
    let ctx = TestContext::new().await;
    let mut body = new_worker();
    body["schedule"]["breaks"] = json!([{ "start": "17:00", "end": "17:30" }]);

    let response = as_user(ctx.server.post("/api/workers"), &ctx.admin)
        .json(&body)
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[test_log::test(tokio::test)]
async fn test_missing_department_is_bad_request() {
    let ctx = TestContext::new().await;
    let mut body = new_worker();
    body["department"] = json!("  ");

    let response = as_user(ctx.server.post("/api/workers"), &ctx.admin)
        .json(&body)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_deactivated_worker_offers_no_slots() {
    let ctx = TestContext::new().await;
    let mut body = new_worker();
    body["is_active"] = json!(false);

    let updated = as_user(
        ctx.server.put(&format!("/api/workers/{}", ctx.worker.id)),
        &ctx.admin,
    )
    .json(&body)
    .await;
    assert_eq!(updated.status_code(), StatusCode::OK);

    let slots = as_user(
        ctx.server.get(&format!("/api/workers/{}/slots", ctx.worker.id)),
        &ctx.client,
    )
    .add_query_param("date", day().to_string())
    .await;
    assert!(slots.json::<SlotListResponse>().slots.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_update_and_delete_unknown_worker() {
    let ctx = TestContext::new().await;
    let path = format!("/api/workers/{}", uuid::Uuid::new_v4());

    let update = as_user(ctx.server.put(&path), &ctx.admin)
        .json(&new_worker())
        .await;
    assert_eq!(update.status_code(), StatusCode::NOT_FOUND);

    let delete = as_user(ctx.server.delete(&path), &ctx.admin).await;
    assert_eq!(delete.status_code(), StatusCode::NOT_FOUND);

    let existing = as_user(
        ctx.server.delete(&format!("/api/workers/{}", ctx.worker.id)),
        &ctx.admin,
    )
    .await;
    assert_eq!(existing.status_code(), StatusCode::NO_CONTENT);
}
