//! Ticket records and their status history.

use chrono::{DateTime, Utc};
use desk_core::{Error, Result, TicketStatus};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::client::Db;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ticket {
    pub id: i64,
    pub subject: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Create a ticket in `open` status and append the initial history row.
pub async fn create(db: &Db, subject: &str, now: DateTime<Utc>) -> Result<Ticket> {
    let mut tx = db.pool().begin().await.map_err(Error::database)?;

    let result = sqlx::query("INSERT INTO tickets (subject, status, created_at) VALUES (?, ?, ?)")
        .bind(subject)
        .bind(TicketStatus::Open.as_str())
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(Error::database)?;
    let id = result.last_insert_rowid();

    sqlx::query(
        "INSERT INTO ticket_status_histories (ticket_id, status, changed_at) VALUES (?, ?, ?)",
    )
    .bind(id)
    .bind(TicketStatus::Open.as_str())
    .bind(now)
    .execute(&mut *tx)
    .await
    .map_err(Error::database)?;

    tx.commit().await.map_err(Error::database)?;

    Ok(Ticket {
        id,
        subject: subject.to_string(),
        status: TicketStatus::Open.as_str().to_string(),
        created_at: now,
    })
}

pub async fn list(db: &Db) -> Result<Vec<Ticket>> {
    sqlx::query_as::<_, Ticket>("SELECT id, subject, status, created_at FROM tickets ORDER BY id")
        .fetch_all(db.pool())
        .await
        .map_err(Error::database)
}

pub async fn get(db: &Db, id: i64) -> Result<Option<Ticket>> {
    sqlx::query_as::<_, Ticket>("SELECT id, subject, status, created_at FROM tickets WHERE id = ?")
        .bind(id)
        .fetch_optional(db.pool())
        .await
        .map_err(Error::database)
}

/// Transition a ticket: update the denormalized status and append a history
/// row, atomically.
pub async fn set_status(
    db: &Db,
    id: i64,
    status: TicketStatus,
    now: DateTime<Utc>,
) -> Result<Ticket> {
    let mut tx = db.pool().begin().await.map_err(Error::database)?;

    let result = sqlx::query("UPDATE tickets SET status = ? WHERE id = ?")
        .bind(status.as_str())
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(Error::database)?;

    if result.rows_affected() == 0 {
        return Err(Error::not_found(format!("ticket {id}")));
    }

    sqlx::query(
        "INSERT INTO ticket_status_histories (ticket_id, status, changed_at) VALUES (?, ?, ?)",
    )
    .bind(id)
    .bind(status.as_str())
    .bind(now)
    .execute(&mut *tx)
    .await
    .map_err(Error::database)?;

    tx.commit().await.map_err(Error::database)?;

    get(db, id)
        .await?
        .ok_or_else(|| Error::not_found(format!("ticket {id}")))
}
