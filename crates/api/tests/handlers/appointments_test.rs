use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use slotbook_core::{
    models::appointment::{Appointment, AppointmentStatus},
    slots::SlotListResponse,
    store::RecordStore,
};

use crate::test_utils::{as_user, day, t, TestContext};

fn booking(ctx: &TestContext, time: &str) -> Value {
    json!({
        "worker_id": ctx.worker.id,
        "date": day(),
        "time": time,
        "reason": "Contract questions",
    })
}

async fn book(ctx: &TestContext, time: &str) -> Appointment {
    let response = as_user(ctx.server.post("/api/appointments"), &ctx.client)
        .json(&booking(ctx, time))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<Appointment>()
}

fn slot_times(listing: &SlotListResponse) -> Vec<String> {
    listing.slots.iter().map(|s| s.time.to_string()).collect()
}

#[test_log::test(tokio::test)]
async fn test_booked_slot_disappears_from_listing() {
    let ctx = TestContext::new().await;
    let path = format!("/api/workers/{}/slots", ctx.worker.id);

    let before = as_user(ctx.server.get(&path), &ctx.client)
        .add_query_param("date", day().to_string())
        .await;
    assert_eq!(before.status_code(), StatusCode::OK);
    assert_eq!(
        slot_times(&before.json::<SlotListResponse>()),
        vec!["09:00", "09:30", "10:30", "11:00", "11:30"]
    );

    let appointment = book(&ctx, "09:30").await;
    assert_eq!(appointment.status, AppointmentStatus::Pending);
    assert_eq!(appointment.requested_by, "client@example.com");
    assert_eq!(appointment.worker_name, "Dana Reyes");

    let after = as_user(ctx.server.get(&path), &ctx.client)
        .add_query_param("date", day().to_string())
        .await;
    assert_eq!(
        slot_times(&after.json::<SlotListResponse>()),
        vec!["09:00", "10:30", "11:00", "11:30"]
    );
}

#[test_log::test(tokio::test)]
async fn test_double_booking_returns_conflict() {
    let ctx = TestContext::new().await;
    book(&ctx, "11:00").await;

    let response = as_user(ctx.server.post("/api/appointments"), &ctx.staff)
        .json(&booking(&ctx, "11:00"))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body = response.json::<Value>();
    assert!(body["error"].as_str().unwrap().contains("please reselect"));
}

#[test_log::test(tokio::test)]
async fn test_booking_during_break_is_bad_request() {
    let ctx = TestContext::new().await;

    let response = as_user(ctx.server.post("/api/appointments"), &ctx.client)
        .json(&booking(&ctx, "10:00"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_booking_requires_identity() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/appointments")
        .json(&booking(&ctx, "09:00"))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[test_log::test(tokio::test)]
async fn test_client_cannot_list_or_change_status() {
    let ctx = TestContext::new().await;
    let appointment = book(&ctx, "09:00").await;

    let list = as_user(ctx.server.get("/api/appointments"), &ctx.client).await;
    assert_eq!(list.status_code(), StatusCode::FORBIDDEN);

    let status = as_user(
        ctx.server
            .put(&format!("/api/appointments/{}/status", appointment.id)),
        &ctx.client,
    )
    .json(&json!({ "status": "confirmed" }))
    .await;
    assert_eq!(status.status_code(), StatusCode::FORBIDDEN);
}

#[test_log::test(tokio::test)]
async fn test_staff_confirms_then_illegal_transition_is_rejected() {
    let ctx = TestContext::new().await;
    let appointment = book(&ctx, "09:00").await;
    let path = format!("/api/appointments/{}/status", appointment.id);

    let confirmed = as_user(ctx.server.put(&path), &ctx.staff)
        .json(&json!({ "status": "confirmed" }))
        .await;
    assert_eq!(confirmed.status_code(), StatusCode::OK);
    assert_eq!(
        confirmed.json::<Appointment>().status,
        AppointmentStatus::Confirmed
    );

    let back = as_user(ctx.server.put(&path), &ctx.staff)
        .json(&json!({ "status": "pending" }))
        .await;
    assert_eq!(back.status_code(), StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_listing_filters_by_status_and_worker() {
    let ctx = TestContext::new().await;
    let first = book(&ctx, "09:00").await;
    book(&ctx, "11:30").await;
    ctx.store
        .set_appointment_status(first.id, AppointmentStatus::Cancelled)
        .await
        .unwrap();

    let response = as_user(ctx.server.get("/api/appointments"), &ctx.staff)
        .add_query_param("status", "pending")
        .add_query_param("worker", "DANA")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let found = response.json::<Vec<Appointment>>();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].time, t("11:30"));
}

#[test_log::test(tokio::test)]
async fn test_requester_can_reschedule_but_others_cannot() {
    let ctx = TestContext::new().await;
    let appointment = book(&ctx, "09:00").await;
    let path = format!("/api/appointments/{}/reschedule", appointment.id);
    let body = json!({ "date": day(), "time": "11:00" });

    let outsider = ctx
        .store
        .insert_user(slotbook_core::models::user::User {
            id: uuid::Uuid::new_v4(),
            email: "other@example.com".to_string(),
            ..ctx.client.clone()
        })
        .await
        .unwrap();
    let denied = as_user(ctx.server.put(&path), &outsider).json(&body).await;
    assert_eq!(denied.status_code(), StatusCode::FORBIDDEN);

    let moved = as_user(ctx.server.put(&path), &ctx.client).json(&body).await;
    assert_eq!(moved.status_code(), StatusCode::OK);
    let moved = moved.json::<Appointment>();
    assert_eq!(moved.time, t("11:00"));
    assert_ne!(moved.id, appointment.id);

    let original = ctx.store.get_appointment(appointment.id).await.unwrap();
    assert_eq!(original.status, AppointmentStatus::Cancelled);
}

#[test_log::test(tokio::test)]
async fn test_only_admin_deletes_appointments() {
    let ctx = TestContext::new().await;
    let appointment = book(&ctx, "09:00").await;
    let path = format!("/api/appointments/{}", appointment.id);

    let denied = as_user(ctx.server.delete(&path), &ctx.staff).await;
    assert_eq!(denied.status_code(), StatusCode::FORBIDDEN);

    let deleted = as_user(ctx.server.delete(&path), &ctx.admin).await;
    assert_eq!(deleted.status_code(), StatusCode::NO_CONTENT);

    let missing = as_user(ctx.server.delete(&path), &ctx.admin).await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}
