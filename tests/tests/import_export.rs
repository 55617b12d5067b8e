//! Bulk CSV import/export through the HTTP API.

use axum::http::StatusCode;
use axum_test::TestServer;
use integration_tests::fixtures::{seed_asset, seed_employee};
use integration_tests::setup::TestContext;

#[tokio::test]
async fn asset_import_skips_and_reports_invalid_rows() {
    let ctx = TestContext::new().await;
    seed_employee(&ctx.db, "100").await;
    let server = TestServer::new(ctx.router.clone()).unwrap();

    let csv = "tag,name,brand,vendor,division,assigned_to\n\
               A-1,Laptop,Lenovo,,,100\n\
               ,Missing tag,,,,\n\
               A-2,Monitor,,,,999\n\
               A-3,Dock,,,,\n";

    let response = server.post("/assets/import").text(csv).await;
    response.assert_status_ok();

    let report: serde_json::Value = response.json();
    assert_eq!(report["total"], 4);
    assert_eq!(report["imported"], 2);

    let failures = report["failures"].as_array().unwrap();
    assert_eq!(failures.len(), 2);
    // Row numbers are file line numbers; the header is line 1.
    assert_eq!(failures[0]["row"], 3);
    assert!(failures[1]["reason"]
        .as_str()
        .unwrap()
        .contains("999 does not exist"));

    let assets: serde_json::Value = server.get("/assets").await.json();
    let tags: Vec<&str> = assets
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["tag"].as_str().unwrap())
        .collect();
    assert_eq!(tags, vec!["A-1", "A-3"]);
}

#[tokio::test]
async fn asset_import_upserts_by_tag() {
    let ctx = TestContext::new().await;
    seed_asset(&ctx.db, "A-1").await;
    let server = TestServer::new(ctx.router.clone()).unwrap();

    let csv = "tag,name,brand,vendor,division,assigned_to\n\
               A-1,Replacement Laptop,Dell,,,\n";
    server.post("/assets/import").text(csv).await.assert_status_ok();

    let assets: serde_json::Value = server.get("/assets").await.json();
    let assets = assets.as_array().unwrap();
    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0]["name"], "Replacement Laptop");
    assert_eq!(assets[0]["brand"], "Dell");
}

#[tokio::test]
async fn employee_import_and_export_round() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router.clone()).unwrap();

    let csv = "nik,name,division,email\n\
               100,Jess,IT,jess@example.com\n\
               101,Sam,,\n\
               102,,Finance,\n";
    let response = server.post("/employees/import").text(csv).await;
    response.assert_status_ok();

    let report: serde_json::Value = response.json();
    assert_eq!(report["imported"], 2);
    assert_eq!(report["failures"].as_array().unwrap().len(), 1);

    let export = server.get("/employees/export").await;
    export.assert_status_ok();
    assert_eq!(export.header("content-type"), "text/csv");

    let body = export.text();
    let mut lines = body.lines();
    assert_eq!(lines.next(), Some("nik,name,division,email"));
    assert_eq!(lines.next(), Some("100,Jess,IT,jess@example.com"));
    assert_eq!(lines.next(), Some("101,Sam,,"));
    assert_eq!(lines.next(), None);
}

#[tokio::test]
async fn export_excludes_trashed_records() {
    let ctx = TestContext::new().await;
    let asset = seed_asset(&ctx.db, "A-1").await;
    seed_asset(&ctx.db, "A-2").await;
    let server = TestServer::new(ctx.router.clone()).unwrap();

    server
        .delete(&format!("/assets/{}", asset.id))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let body = server.get("/assets/export").await.text();
    assert!(!body.contains("A-1"));
    assert!(body.contains("A-2"));
}

#[tokio::test]
async fn ticket_export_carries_current_status() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router.clone()).unwrap();

    let created = server
        .post("/tickets")
        .json(&serde_json::json!({ "subject": "VPN down" }))
        .await;
    let id = created.json::<serde_json::Value>()["id"].as_i64().unwrap();
    server
        .post(&format!("/tickets/{id}/status"))
        .json(&serde_json::json!({ "status": "resolved" }))
        .await
        .assert_status_ok();

    let body = server.get("/tickets/export").await.text();
    let mut lines = body.lines();
    assert_eq!(lines.next(), Some("id,subject,status,created_at"));
    let row = lines.next().unwrap();
    assert!(row.starts_with(&format!("{id},VPN down,resolved,")));
}
