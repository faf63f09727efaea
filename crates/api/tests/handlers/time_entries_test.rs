use slotbook_core::store::RecordStore;
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use slotbook_core::models::time_entry::TimeEntry;

use crate::test_utils::{as_user, day, TestContext};

#[test_log::test(tokio::test)]
async fn test_staff_records_hours_from_times() {
    let ctx = TestContext::new().await;

    let response = as_user(ctx.server.post("/api/time-entries"), &ctx.staff)
        .json(&json!({
            "worker_id": ctx.worker.id,
            "date": day(),
            "start_time": "09:00",
            "end_time": "17:30",
            "break_minutes": 30,
            "description": "Front desk",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let entry = response.json::<TimeEntry>();
    assert_eq!(entry.hours, 8.0);
    assert_eq!(entry.worker_id, ctx.worker.id);
}

#[test_log::test(tokio::test)]
async fn test_staff_cannot_record_for_other_workers() {
    let ctx = TestContext::new().await;

    let response = as_user(ctx.server.post("/api/time-entries"), &ctx.staff)
        .json(&json!({ "worker_id": uuid::Uuid::new_v4(), "date": day(), "hours": 4.0 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[test_log::test(tokio::test)]
async fn test_out_of_range_hours_are_rejected() {
    let ctx = TestContext::new().await;

    let response = as_user(ctx.server.post("/api/time-entries"), &ctx.admin)
        .json(&json!({ "worker_id": ctx.worker.id, "date": day(), "hours": 25.0 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_listing_is_scoped_by_role() {
    let ctx = TestContext::new().await;
    for (user, worker_id) in [(&ctx.staff, ctx.worker.id), (&ctx.admin, ctx.worker.id)] {
        let response = as_user(ctx.server.post("/api/time-entries"), user)
            .json(&json!({ "worker_id": worker_id, "date": day(), "hours": 2.5 }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    let other = uuid::Uuid::new_v4();
    ctx.store
        .insert_time_entry(TimeEntry {
            id: uuid::Uuid::new_v4(),
            worker_id: other,
            date: day(),
            hours: 1.0,
            start_time: None,
            end_time: None,
            description: None,
        })
        .await
        .unwrap();

    let own = as_user(ctx.server.get("/api/time-entries"), &ctx.staff).await;
    assert_eq!(own.json::<Vec<TimeEntry>>().len(), 2);

    let all = as_user(ctx.server.get("/api/time-entries"), &ctx.admin).await;
    assert_eq!(all.json::<Vec<TimeEntry>>().len(), 3);

    let client = as_user(ctx.server.get("/api/time-entries"), &ctx.client).await;
    assert_eq!(client.status_code(), StatusCode::FORBIDDEN);
}
