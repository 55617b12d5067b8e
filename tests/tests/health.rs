//! Health endpoint behavior.

use axum_test::TestServer;
use integration_tests::setup::TestContext;

#[tokio::test]
async fn health_reports_component_status() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router.clone()).unwrap();

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert!(body.get("status").is_some());
    assert_eq!(body["database_connected"], true);
    assert!(body.get("workers_running").is_some());
}

#[tokio::test]
async fn liveness_is_always_ok() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router.clone()).unwrap();

    server.get("/health/live").await.assert_status_ok();
}

#[tokio::test]
async fn readiness_follows_the_database() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router.clone()).unwrap();

    // Setup marked the database healthy.
    server.get("/health/ready").await.assert_status_ok();
}
