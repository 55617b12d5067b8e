//! Asset loans and the overdue sweep.

use chrono::{DateTime, Utc};
use desk_core::{Error, Result};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::client::Db;
use crate::{assets, employees};

/// Loan lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    Ongoing,
    Returned,
    Overdue,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ongoing => "ongoing",
            Self::Returned => "returned",
            Self::Overdue => "overdue",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Loan {
    pub id: i64,
    pub asset_id: i64,
    pub employee_id: i64,
    pub status: String,
    pub loaned_at: DateTime<Utc>,
    pub due_at: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLoan {
    pub asset_id: i64,
    pub employee_id: i64,
    pub due_at: DateTime<Utc>,
}

const SELECT_COLUMNS: &str =
    "SELECT id, asset_id, employee_id, status, loaned_at, due_at, returned_at FROM loans";

pub async fn create(db: &Db, loan: &NewLoan, now: DateTime<Utc>) -> Result<Loan> {
    if assets::get(db, loan.asset_id).await?.is_none() {
        return Err(Error::validation(format!("asset {} does not exist", loan.asset_id)));
    }
    if employees::get(db, loan.employee_id).await?.is_none() {
        return Err(Error::validation(format!(
            "employee {} does not exist",
            loan.employee_id
        )));
    }

    let result = sqlx::query(
        "INSERT INTO loans (asset_id, employee_id, status, loaned_at, due_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(loan.asset_id)
    .bind(loan.employee_id)
    .bind(LoanStatus::Ongoing.as_str())
    .bind(now)
    .bind(loan.due_at)
    .execute(db.pool())
    .await
    .map_err(Error::database)?;

    get(db, result.last_insert_rowid())
        .await?
        .ok_or_else(|| Error::internal("loan vanished after insert"))
}

pub async fn list(db: &Db) -> Result<Vec<Loan>> {
    sqlx::query_as::<_, Loan>(&format!("{SELECT_COLUMNS} ORDER BY id"))
        .fetch_all(db.pool())
        .await
        .map_err(Error::database)
}

pub async fn get(db: &Db, id: i64) -> Result<Option<Loan>> {
    sqlx::query_as::<_, Loan>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
        .bind(id)
        .fetch_optional(db.pool())
        .await
        .map_err(Error::database)
}

/// Close out a loan. Works for both ongoing and overdue loans.
pub async fn mark_returned(db: &Db, id: i64, now: DateTime<Utc>) -> Result<Loan> {
    let result = sqlx::query(
        "UPDATE loans SET status = ?, returned_at = ? WHERE id = ? AND status IN (?, ?)",
    )
    .bind(LoanStatus::Returned.as_str())
    .bind(now)
    .bind(id)
    .bind(LoanStatus::Ongoing.as_str())
    .bind(LoanStatus::Overdue.as_str())
    .execute(db.pool())
    .await
    .map_err(Error::database)?;

    if result.rows_affected() == 0 {
        return Err(Error::not_found(format!("open loan {id}")));
    }

    get(db, id)
        .await?
        .ok_or_else(|| Error::not_found(format!("loan {id}")))
}

/// Daily sweep: ongoing loans past their due date become overdue.
/// Returns the number of loans flipped.
pub async fn sweep_overdue(db: &Db, now: DateTime<Utc>) -> Result<u64> {
    let result = sqlx::query("UPDATE loans SET status = ? WHERE status = ? AND due_at < ?")
        .bind(LoanStatus::Overdue.as_str())
        .bind(LoanStatus::Ongoing.as_str())
        .bind(now)
        .execute(db.pool())
        .await
        .map_err(Error::database)?;

    Ok(result.rows_affected())
}
