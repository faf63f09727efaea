use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use slotbook_core::models::user::{Module, Role, UserProfile};

use crate::test_utils::{as_user, TestContext, PASSWORD};

fn registration(email: &str) -> Value {
    json!({
        "first_name": "Noa",
        "last_name": "Ferrer",
        "email": email,
        "password": "long-enough-1",
    })
}

#[test_log::test(tokio::test)]
async fn test_register_creates_plain_user() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/auth/register")
        .json(&registration("Noa.Ferrer@Example.com"))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let profile = response.json::<UserProfile>();
    assert_eq!(profile.role, Role::User);
    assert_eq!(profile.email, "noa.ferrer@example.com");
    assert_eq!(
        profile.modules,
        vec![Module::Dashboard, Module::Profile, Module::Appointments]
    );

    let body = response.json::<Value>();
    assert!(body.get("password_hash").is_none());
}

#[test_log::test(tokio::test)]
async fn test_duplicate_registration_conflicts() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/auth/register")
        .json(&registration("CLIENT@example.com"))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[test_log::test(tokio::test)]
async fn test_short_password_is_rejected() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/auth/register")
        .json(&json!({ "first_name": "Noa", "email": "noa@example.com", "password": "short" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_login_checks_password() {
    let ctx = TestContext::new().await;

    let ok = ctx
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": "dana@example.com", "password": PASSWORD }))
        .await;
    assert_eq!(ok.status_code(), StatusCode::OK);
    let profile = ok.json::<UserProfile>();
    assert_eq!(profile.id, ctx.staff.id);
    assert_eq!(profile.worker_id, Some(ctx.worker.id));

    let wrong = ctx
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": "dana@example.com", "password": "guess-again" }))
        .await;
    assert_eq!(wrong.status_code(), StatusCode::UNAUTHORIZED);

    let unknown = ctx
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": "nobody@example.com", "password": PASSWORD }))
        .await;
    assert_eq!(unknown.status_code(), StatusCode::UNAUTHORIZED);
}

#[test_log::test(tokio::test)]
async fn test_admin_promotes_user_to_worker() {
    let ctx = TestContext::new().await;
    let path = format!("/api/users/{}/role", ctx.client.id);
    let body = json!({ "role": "worker", "worker_id": ctx.worker.id });

    let denied = as_user(ctx.server.put(&path), &ctx.staff).json(&body).await;
    assert_eq!(denied.status_code(), StatusCode::FORBIDDEN);

    let promoted = as_user(ctx.server.put(&path), &ctx.admin).json(&body).await;
    assert_eq!(promoted.status_code(), StatusCode::OK);
    let profile = promoted.json::<UserProfile>();
    assert_eq!(profile.role, Role::Worker);
    assert!(profile.modules.contains(&Module::TimeTracking));

    let bad_worker = as_user(ctx.server.put(&path), &ctx.admin)
        .json(&json!({ "role": "worker", "worker_id": uuid::Uuid::new_v4() }))
        .await;
    assert_eq!(bad_worker.status_code(), StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn test_unknown_user_header_is_unauthorized() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .get("/api/workers")
        .add_header(
            axum::http::HeaderName::from_static("x-user-id"),
            axum::http::HeaderValue::from_static("not-a-uuid"),
        )
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
