use std::sync::Arc;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use slotbook_core::report::ReportSummary;
use slotbook_db::memory::MemoryStore;

use crate::test_utils::{as_user, TestContext};

#[test_log::test(tokio::test)]
async fn test_summary_over_seeded_data() {
    let ctx = TestContext::with_store(Arc::new(MemoryStore::seeded().unwrap())).await;

    let response = as_user(ctx.server.get("/api/reports/summary"), &ctx.admin)
        .add_query_param("start", "2024-01-15")
        .add_query_param("end", "2024-01-16")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let report = response.json::<ReportSummary>();
    assert_eq!(report.total_workers, 6);
    assert_eq!(report.active_workers, 6);
    assert_eq!(report.total_appointments, 2);
    assert_eq!(report.pending_appointments, 1);
    assert_eq!(report.confirmed_appointments, 1);
    assert_eq!(report.total_hours_worked, 24.0);
    assert_eq!(report.average_hours_per_worker, 4.0);
    let names: Vec<&str> = report.departments.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Engineering", "Finance", "Human Resources", "Marketing", "Sales", "Support"]
    );
}

#[test_log::test(tokio::test)]
async fn test_inverted_range_is_bad_request() {
    let ctx = TestContext::new().await;

    let response = as_user(ctx.server.get("/api/reports/summary"), &ctx.admin)
        .add_query_param("start", "2024-02-01")
        .add_query_param("end", "2024-01-01")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_summary_is_admin_only() {
    let ctx = TestContext::new().await;

    let response = as_user(ctx.server.get("/api/reports/summary"), &ctx.staff)
        .add_query_param("start", "2024-01-01")
        .add_query_param("end", "2024-01-31")
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}
