//! Employee records, soft-deletable.

use chrono::{DateTime, Utc};
use desk_core::{Error, Result};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteConnection};

use crate::client::Db;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Employee {
    pub id: i64,
    /// Employee identification number, the natural key.
    pub nik: String,
    pub name: String,
    pub division: Option<String>,
    pub email: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEmployee {
    pub nik: String,
    pub name: String,
    pub division: Option<String>,
    pub email: Option<String>,
}

const SELECT_COLUMNS: &str = "SELECT id, nik, name, division, email, deleted_at FROM employees";

pub async fn create(db: &Db, employee: &NewEmployee) -> Result<Employee> {
    let result =
        sqlx::query("INSERT INTO employees (nik, name, division, email) VALUES (?, ?, ?, ?)")
            .bind(&employee.nik)
            .bind(&employee.name)
            .bind(&employee.division)
            .bind(&employee.email)
            .execute(db.pool())
            .await
            .map_err(Error::database)?;

    get(db, result.last_insert_rowid())
        .await?
        .ok_or_else(|| Error::internal("employee vanished after insert"))
}

pub async fn list(db: &Db) -> Result<Vec<Employee>> {
    sqlx::query_as::<_, Employee>(&format!(
        "{SELECT_COLUMNS} WHERE deleted_at IS NULL ORDER BY id"
    ))
    .fetch_all(db.pool())
    .await
    .map_err(Error::database)
}

pub async fn get(db: &Db, id: i64) -> Result<Option<Employee>> {
    sqlx::query_as::<_, Employee>(&format!("{SELECT_COLUMNS} WHERE id = ? AND deleted_at IS NULL"))
        .bind(id)
        .fetch_optional(db.pool())
        .await
        .map_err(Error::database)
}

pub async fn update(db: &Db, id: i64, employee: &NewEmployee) -> Result<Employee> {
    let result = sqlx::query(
        "UPDATE employees SET nik = ?, name = ?, division = ?, email = ? WHERE id = ? AND deleted_at IS NULL",
    )
    .bind(&employee.nik)
    .bind(&employee.name)
    .bind(&employee.division)
    .bind(&employee.email)
    .bind(id)
    .execute(db.pool())
    .await
    .map_err(Error::database)?;

    if result.rows_affected() == 0 {
        return Err(Error::not_found(format!("employee {id}")));
    }

    get(db, id)
        .await?
        .ok_or_else(|| Error::not_found(format!("employee {id}")))
}

pub async fn soft_delete(db: &Db, id: i64, now: DateTime<Utc>) -> Result<()> {
    let result =
        sqlx::query("UPDATE employees SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL")
            .bind(now)
            .bind(id)
            .execute(db.pool())
            .await
            .map_err(Error::database)?;

    if result.rows_affected() == 0 {
        return Err(Error::not_found(format!("employee {id}")));
    }
    Ok(())
}

pub async fn list_trashed(db: &Db) -> Result<Vec<Employee>> {
    sqlx::query_as::<_, Employee>(&format!(
        "{SELECT_COLUMNS} WHERE deleted_at IS NOT NULL ORDER BY deleted_at DESC"
    ))
    .fetch_all(db.pool())
    .await
    .map_err(Error::database)
}

pub async fn restore(db: &Db, id: i64) -> Result<()> {
    let result = sqlx::query(
        "UPDATE employees SET deleted_at = NULL WHERE id = ? AND deleted_at IS NOT NULL",
    )
    .bind(id)
    .execute(db.pool())
    .await
    .map_err(Error::database)?;

    if result.rows_affected() == 0 {
        return Err(Error::not_found(format!("trashed employee {id}")));
    }
    Ok(())
}

pub async fn purge(db: &Db, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM employees WHERE id = ? AND deleted_at IS NOT NULL")
        .bind(id)
        .execute(db.pool())
        .await
        .map_err(Error::database)?;

    if result.rows_affected() == 0 {
        return Err(Error::not_found(format!("trashed employee {id}")));
    }
    Ok(())
}

/// Import path: insert or overwrite by the natural key `nik`.
pub async fn upsert_by_nik(conn: &mut SqliteConnection, employee: &NewEmployee) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO employees (nik, name, division, email)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(nik) DO UPDATE SET
            name = excluded.name,
            division = excluded.division,
            email = excluded.email
        "#,
    )
    .bind(&employee.nik)
    .bind(&employee.name)
    .bind(&employee.division)
    .bind(&employee.email)
    .execute(conn)
    .await
    .map_err(Error::database)?;

    Ok(())
}

/// Whether a live employee with this nik exists (referential check for
/// asset imports).
pub async fn nik_exists(conn: &mut SqliteConnection, nik: &str) -> Result<bool> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM employees WHERE nik = ? AND deleted_at IS NULL")
            .bind(nik)
            .fetch_one(conn)
            .await
            .map_err(Error::database)?;
    Ok(count > 0)
}
