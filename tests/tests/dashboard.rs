//! Dashboard endpoint behavior.

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::NaiveDate;
use integration_tests::fixtures::{insert_history, utc};
use integration_tests::setup::TestContext;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn returns_month_series_after_rollup() {
    let ctx = TestContext::new().await;
    insert_history(&ctx.db, 1, "open", utc(2024, 3, 1, 8, 0)).await;
    ctx.rollup_worker()
        .rebuild_range(date(2024, 3, 1), date(2024, 3, 2))
        .await
        .unwrap();

    let server = TestServer::new(ctx.router.clone()).unwrap();
    let response = server
        .get("/dashboard/daily-ticket-status")
        .add_query_param("month", "2024-03")
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["month"], "2024-03");
    let days = body["days"].as_array().unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0]["date"], "2024-03-01");
    assert_eq!(days[0]["open"], 1);
    assert_eq!(days[1]["open"], 1);
}

#[tokio::test]
async fn empty_month_returns_empty_series() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router.clone()).unwrap();

    let response = server
        .get("/dashboard/daily-ticket-status")
        .add_query_param("month", "2019-01")
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert!(body["days"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_month_is_rejected() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router.clone()).unwrap();

    for month in ["March-2024", "2024-13", "2024"] {
        let response = server
            .get("/dashboard/daily-ticket-status")
            .add_query_param("month", month)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn serves_cached_series_without_touching_the_store() {
    let ctx = TestContext::new().await;

    // A canned cache entry shadows whatever is in the store.
    let canned = store::DailyStatusMetric {
        date: date(2024, 3, 1),
        open: 42,
        in_progress: 0,
        resolved: 0,
        closed: 0,
        cancelled: 0,
        updated_at: utc(2024, 3, 1, 17, 0),
    };
    ctx.cache
        .insert(
            "dashboard:dailyTicketStatus:2024-03".to_string(),
            Arc::new(vec![canned]),
        )
        .await;

    let server = TestServer::new(ctx.router.clone()).unwrap();
    let response = server
        .get("/dashboard/daily-ticket-status")
        .add_query_param("month", "2024-03")
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["days"][0]["open"], 42);
}

#[tokio::test]
async fn rebuild_endpoint_runs_the_rollup() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router.clone()).unwrap();

    // A ticket created through the API seeds today's history.
    let created = server
        .post("/tickets")
        .json(&serde_json::json!({ "subject": "Broken monitor" }))
        .await;
    created.assert_status(StatusCode::CREATED);

    let response = server.post("/admin/rebuild-metrics").await;
    response.assert_status_ok();

    let summary: serde_json::Value = response.json();
    assert!(summary["dates_written"].as_u64().unwrap() >= 1);

    let dashboard = server.get("/dashboard/daily-ticket-status").await;
    dashboard.assert_status_ok();
    let body: serde_json::Value = dashboard.json();
    let days = body["days"].as_array().unwrap();
    assert_eq!(days.last().unwrap()["open"], 1);
}
