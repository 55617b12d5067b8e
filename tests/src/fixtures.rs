//! Raw-row fixtures for rollup tests.

use chrono::{DateTime, TimeZone, Utc};
use store::assets::{self, Asset, NewAsset};
use store::employees::{self, Employee, NewEmployee};
use store::Db;

/// UTC timestamp shorthand.
pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .expect("valid timestamp")
}

/// Append a status history row directly, bypassing the ticket API.
pub async fn insert_history(db: &Db, ticket_id: i64, status: &str, changed_at: DateTime<Utc>) {
    sqlx::query(
        "INSERT INTO ticket_status_histories (ticket_id, status, changed_at) VALUES (?, ?, ?)",
    )
    .bind(ticket_id)
    .bind(status)
    .bind(changed_at)
    .execute(db.pool())
    .await
    .expect("history insert");
}

pub async fn seed_asset(db: &Db, tag: &str) -> Asset {
    assets::create(
        db,
        &NewAsset {
            tag: tag.to_string(),
            name: format!("Asset {tag}"),
            brand: None,
            vendor: None,
            division: None,
            assigned_to: None,
        },
    )
    .await
    .expect("asset seed")
}

pub async fn seed_employee(db: &Db, nik: &str) -> Employee {
    employees::create(
        db,
        &NewEmployee {
            nik: nik.to_string(),
            name: format!("Employee {nik}"),
            division: None,
            email: None,
        },
    )
    .await
    .expect("employee seed")
}
