//! Background job behavior: overdue sweep and backups.

use chrono::Utc;
use integration_tests::fixtures::{seed_asset, seed_employee, utc};
use integration_tests::setup::TestContext;
use store::loans::{self, NewLoan};
use worker::BackupWorker;

#[tokio::test]
async fn sweep_flips_only_past_due_ongoing_loans() {
    let ctx = TestContext::new().await;
    let asset_a = seed_asset(&ctx.db, "A-1").await;
    let asset_b = seed_asset(&ctx.db, "A-2").await;
    let asset_c = seed_asset(&ctx.db, "A-3").await;
    let employee = seed_employee(&ctx.db, "100").await;

    let now = utc(2024, 3, 10, 12, 0);

    // Past due, still ongoing: should flip.
    let late = loans::create(
        &ctx.db,
        &NewLoan {
            asset_id: asset_a.id,
            employee_id: employee.id,
            due_at: utc(2024, 3, 9, 0, 0),
        },
        utc(2024, 3, 1, 0, 0),
    )
    .await
    .unwrap();

    // Not yet due: untouched.
    let current = loans::create(
        &ctx.db,
        &NewLoan {
            asset_id: asset_b.id,
            employee_id: employee.id,
            due_at: utc(2024, 3, 20, 0, 0),
        },
        utc(2024, 3, 1, 0, 0),
    )
    .await
    .unwrap();

    // Past due but already returned: untouched.
    let returned = loans::create(
        &ctx.db,
        &NewLoan {
            asset_id: asset_c.id,
            employee_id: employee.id,
            due_at: utc(2024, 3, 5, 0, 0),
        },
        utc(2024, 3, 1, 0, 0),
    )
    .await
    .unwrap();
    loans::mark_returned(&ctx.db, returned.id, utc(2024, 3, 4, 0, 0))
        .await
        .unwrap();

    let flipped = loans::sweep_overdue(&ctx.db, now).await.unwrap();
    assert_eq!(flipped, 1);

    assert_eq!(
        loans::get(&ctx.db, late.id).await.unwrap().unwrap().status,
        "overdue"
    );
    assert_eq!(
        loans::get(&ctx.db, current.id).await.unwrap().unwrap().status,
        "ongoing"
    );
    assert_eq!(
        loans::get(&ctx.db, returned.id).await.unwrap().unwrap().status,
        "returned"
    );

    // A second sweep finds nothing left to flip.
    assert_eq!(loans::sweep_overdue(&ctx.db, now).await.unwrap(), 0);
}

#[tokio::test]
async fn overdue_loan_can_still_be_returned() {
    let ctx = TestContext::new().await;
    let asset = seed_asset(&ctx.db, "A-1").await;
    let employee = seed_employee(&ctx.db, "100").await;

    let loan = loans::create(
        &ctx.db,
        &NewLoan {
            asset_id: asset.id,
            employee_id: employee.id,
            due_at: utc(2024, 3, 5, 0, 0),
        },
        utc(2024, 3, 1, 0, 0),
    )
    .await
    .unwrap();

    loans::sweep_overdue(&ctx.db, utc(2024, 3, 10, 0, 0)).await.unwrap();
    let closed = loans::mark_returned(&ctx.db, loan.id, utc(2024, 3, 11, 0, 0))
        .await
        .unwrap();
    assert_eq!(closed.status, "returned");
    assert!(closed.returned_at.is_some());
}

#[tokio::test]
async fn backup_writes_a_timestamped_snapshot() {
    let ctx = TestContext::new().await;
    seed_asset(&ctx.db, "A-1").await;

    let dir = tempfile::tempdir().unwrap();
    let worker = BackupWorker::new(ctx.db.clone(), dir.path());

    let target = worker.run(Utc::now()).await.unwrap();
    assert!(target.exists());
    assert!(target
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("deskwatch-"));
    assert!(std::fs::metadata(&target).unwrap().len() > 0);
}
