//! Schema bootstrap.
//!
//! All tables are created idempotently at startup; the settings singleton
//! row is seeded on first run.

use desk_core::{Error, Result};
use tracing::info;

use crate::client::Db;

const TICKETS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS tickets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    subject TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'open',
    created_at TEXT NOT NULL
)
"#;

/// Append-only status transition log. Input to the rollup; never mutated
/// by it.
const TICKET_STATUS_HISTORIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS ticket_status_histories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    ticket_id INTEGER NOT NULL,
    status TEXT NOT NULL,
    changed_at TEXT NOT NULL
)
"#;

const TICKET_STATUS_HISTORIES_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_histories_ticket_changed
ON ticket_status_histories (ticket_id, changed_at)
"#;

/// One row per calendar date; written only by the rollup.
const DAILY_METRICS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS daily_ticket_status_metrics (
    date TEXT PRIMARY KEY,
    open INTEGER NOT NULL DEFAULT 0,
    in_progress INTEGER NOT NULL DEFAULT 0,
    resolved INTEGER NOT NULL DEFAULT 0,
    closed INTEGER NOT NULL DEFAULT 0,
    cancelled INTEGER NOT NULL DEFAULT 0,
    updated_at TEXT NOT NULL
)
"#;

const ASSETS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS assets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    tag TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    brand TEXT,
    vendor TEXT,
    division TEXT,
    assigned_to TEXT,
    deleted_at TEXT
)
"#;

const EMPLOYEES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nik TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    division TEXT,
    email TEXT,
    deleted_at TEXT
)
"#;

const LOANS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS loans (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    asset_id INTEGER NOT NULL,
    employee_id INTEGER NOT NULL,
    status TEXT NOT NULL DEFAULT 'ongoing',
    loaned_at TEXT NOT NULL,
    due_at TEXT NOT NULL,
    returned_at TEXT
)
"#;

const SETTINGS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS settings (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    backup_frequency TEXT NOT NULL DEFAULT 'off',
    backup_hour INTEGER NOT NULL DEFAULT 1,
    backup_minute INTEGER NOT NULL DEFAULT 0,
    backup_weekday INTEGER NOT NULL DEFAULT 0,
    backup_day_of_month INTEGER NOT NULL DEFAULT 1
)
"#;

const SETTINGS_SEED: &str = "INSERT OR IGNORE INTO settings (id) VALUES (1)";

/// Create all tables and seed the settings row.
pub async fn init_schema(db: &Db) -> Result<()> {
    let statements = [
        TICKETS_TABLE,
        TICKET_STATUS_HISTORIES_TABLE,
        TICKET_STATUS_HISTORIES_INDEX,
        DAILY_METRICS_TABLE,
        ASSETS_TABLE,
        EMPLOYEES_TABLE,
        LOANS_TABLE,
        SETTINGS_TABLE,
        SETTINGS_SEED,
    ];

    for sql in statements {
        sqlx::query(sql)
            .execute(db.pool())
            .await
            .map_err(Error::database)?;
    }

    info!("Schema initialized");
    Ok(())
}
