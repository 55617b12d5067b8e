//! CRUD, trash and settings over the HTTP API.

use axum::http::StatusCode;
use axum_test::TestServer;
use integration_tests::fixtures::{seed_asset, seed_employee};
use integration_tests::setup::TestContext;
use serde_json::json;

#[tokio::test]
async fn asset_lifecycle_create_update_trash_restore_purge() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router.clone()).unwrap();

    let created = server
        .post("/assets")
        .json(&json!({ "tag": "A-100", "name": "Laptop", "brand": "Lenovo" }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let asset: serde_json::Value = created.json();
    let id = asset["id"].as_i64().unwrap();

    let updated = server
        .put(&format!("/assets/{id}"))
        .json(&json!({ "tag": "A-100", "name": "Laptop", "division": "IT" }))
        .await;
    updated.assert_status_ok();
    let asset: serde_json::Value = updated.json();
    assert_eq!(asset["division"], "IT");

    // Soft delete moves it to the trash.
    server
        .delete(&format!("/assets/{id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .get(&format!("/assets/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let trash: serde_json::Value = server.get("/trash/assets").await.json();
    assert_eq!(trash.as_array().unwrap().len(), 1);

    // Restore brings it back live.
    server
        .post(&format!("/trash/assets/{id}/restore"))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .get(&format!("/assets/{id}"))
        .await
        .assert_status_ok();

    // Purge only works on trashed records.
    server
        .delete(&format!("/trash/assets/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .delete(&format!("/assets/{id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .delete(&format!("/trash/assets/{id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert!(server
        .get("/trash/assets")
        .await
        .json::<serde_json::Value>()
        .as_array()
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn asset_payload_requires_tag_and_name() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router.clone()).unwrap();

    let response = server
        .post("/assets")
        .json(&json!({ "tag": "", "name": "Laptop" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "VALIDATION");
}

#[tokio::test]
async fn employee_email_is_validated() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router.clone()).unwrap();

    let response = server
        .post("/employees")
        .json(&json!({ "nik": "100", "name": "Jess", "email": "not-an-email" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let ok = server
        .post("/employees")
        .json(&json!({ "nik": "100", "name": "Jess", "email": "jess@example.com" }))
        .await;
    ok.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn ticket_transition_appends_history() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router.clone()).unwrap();

    let created = server
        .post("/tickets")
        .json(&json!({ "subject": "VPN down" }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let ticket: serde_json::Value = created.json();
    let id = ticket["id"].as_i64().unwrap();
    assert_eq!(ticket["status"], "open");

    let moved = server
        .post(&format!("/tickets/{id}/status"))
        .json(&json!({ "status": "in_progress" }))
        .await;
    moved.assert_status_ok();
    let ticket: serde_json::Value = moved.json();
    assert_eq!(ticket["status"], "in_progress");

    let history_rows: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM ticket_status_histories WHERE ticket_id = ?")
            .bind(id)
            .fetch_one(ctx.db.pool())
            .await
            .unwrap();
    assert_eq!(history_rows, 2);
}

#[tokio::test]
async fn unknown_ticket_status_is_rejected() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router.clone()).unwrap();

    let created = server
        .post("/tickets")
        .json(&json!({ "subject": "Printer jam" }))
        .await;
    let id = created.json::<serde_json::Value>()["id"].as_i64().unwrap();

    let response = server
        .post(&format!("/tickets/{id}/status"))
        .json(&json!({ "status": "wont_fix" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn loans_require_existing_asset_and_employee() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router.clone()).unwrap();

    let response = server
        .post("/loans")
        .json(&json!({ "asset_id": 999, "employee_id": 999, "due_at": "2024-04-01T00:00:00Z" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let asset = seed_asset(&ctx.db, "A-1").await;
    let employee = seed_employee(&ctx.db, "100").await;

    let created = server
        .post("/loans")
        .json(&json!({
            "asset_id": asset.id,
            "employee_id": employee.id,
            "due_at": "2024-04-01T00:00:00Z"
        }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let loan: serde_json::Value = created.json();
    assert_eq!(loan["status"], "ongoing");

    let id = loan["id"].as_i64().unwrap();
    let returned = server.post(&format!("/loans/{id}/return")).await;
    returned.assert_status_ok();
    assert_eq!(returned.json::<serde_json::Value>()["status"], "returned");

    // A second return is a no-op target.
    server
        .post(&format!("/loans/{id}/return"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn settings_round_trip_and_validation() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router.clone()).unwrap();

    let defaults: serde_json::Value = server.get("/settings").await.json();
    assert_eq!(defaults["backup_frequency"], "off");

    let updated = server
        .put("/settings")
        .json(&json!({
            "backup_frequency": "weekly",
            "backup_hour": 2,
            "backup_minute": 15,
            "backup_weekday": 4,
            "backup_day_of_month": 1
        }))
        .await;
    updated.assert_status_ok();

    let reloaded: serde_json::Value = server.get("/settings").await.json();
    assert_eq!(reloaded["backup_frequency"], "weekly");
    assert_eq!(reloaded["backup_weekday"], 4);

    let bad_frequency = server
        .put("/settings")
        .json(&json!({
            "backup_frequency": "hourly",
            "backup_hour": 2,
            "backup_minute": 15,
            "backup_weekday": 4,
            "backup_day_of_month": 1
        }))
        .await;
    bad_frequency.assert_status(StatusCode::BAD_REQUEST);

    let bad_hour = server
        .put("/settings")
        .json(&json!({
            "backup_frequency": "daily",
            "backup_hour": 24,
            "backup_minute": 0,
            "backup_weekday": 0,
            "backup_day_of_month": 1
        }))
        .await;
    bad_hour.assert_status(StatusCode::BAD_REQUEST);
}
