//! Asset records, soft-deletable.

use chrono::{DateTime, Utc};
use desk_core::{Error, Result};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteConnection};

use crate::client::Db;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Asset {
    pub id: i64,
    pub tag: String,
    pub name: String,
    pub brand: Option<String>,
    pub vendor: Option<String>,
    pub division: Option<String>,
    /// Employee nik the asset is assigned to.
    pub assigned_to: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAsset {
    pub tag: String,
    pub name: String,
    pub brand: Option<String>,
    pub vendor: Option<String>,
    pub division: Option<String>,
    pub assigned_to: Option<String>,
}

const SELECT_COLUMNS: &str =
    "SELECT id, tag, name, brand, vendor, division, assigned_to, deleted_at FROM assets";

pub async fn create(db: &Db, asset: &NewAsset) -> Result<Asset> {
    let result = sqlx::query(
        "INSERT INTO assets (tag, name, brand, vendor, division, assigned_to) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&asset.tag)
    .bind(&asset.name)
    .bind(&asset.brand)
    .bind(&asset.vendor)
    .bind(&asset.division)
    .bind(&asset.assigned_to)
    .execute(db.pool())
    .await
    .map_err(Error::database)?;

    get(db, result.last_insert_rowid())
        .await?
        .ok_or_else(|| Error::internal("asset vanished after insert"))
}

pub async fn list(db: &Db) -> Result<Vec<Asset>> {
    sqlx::query_as::<_, Asset>(&format!("{SELECT_COLUMNS} WHERE deleted_at IS NULL ORDER BY id"))
        .fetch_all(db.pool())
        .await
        .map_err(Error::database)
}

pub async fn get(db: &Db, id: i64) -> Result<Option<Asset>> {
    sqlx::query_as::<_, Asset>(&format!("{SELECT_COLUMNS} WHERE id = ? AND deleted_at IS NULL"))
        .bind(id)
        .fetch_optional(db.pool())
        .await
        .map_err(Error::database)
}

pub async fn update(db: &Db, id: i64, asset: &NewAsset) -> Result<Asset> {
    let result = sqlx::query(
        r#"
        UPDATE assets
        SET tag = ?, name = ?, brand = ?, vendor = ?, division = ?, assigned_to = ?
        WHERE id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(&asset.tag)
    .bind(&asset.name)
    .bind(&asset.brand)
    .bind(&asset.vendor)
    .bind(&asset.division)
    .bind(&asset.assigned_to)
    .bind(id)
    .execute(db.pool())
    .await
    .map_err(Error::database)?;

    if result.rows_affected() == 0 {
        return Err(Error::not_found(format!("asset {id}")));
    }

    get(db, id)
        .await?
        .ok_or_else(|| Error::not_found(format!("asset {id}")))
}

/// Move an asset to the trash.
pub async fn soft_delete(db: &Db, id: i64, now: DateTime<Utc>) -> Result<()> {
    let result = sqlx::query("UPDATE assets SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL")
        .bind(now)
        .bind(id)
        .execute(db.pool())
        .await
        .map_err(Error::database)?;

    if result.rows_affected() == 0 {
        return Err(Error::not_found(format!("asset {id}")));
    }
    Ok(())
}

pub async fn list_trashed(db: &Db) -> Result<Vec<Asset>> {
    sqlx::query_as::<_, Asset>(&format!(
        "{SELECT_COLUMNS} WHERE deleted_at IS NOT NULL ORDER BY deleted_at DESC"
    ))
    .fetch_all(db.pool())
    .await
    .map_err(Error::database)
}

pub async fn restore(db: &Db, id: i64) -> Result<()> {
    let result =
        sqlx::query("UPDATE assets SET deleted_at = NULL WHERE id = ? AND deleted_at IS NOT NULL")
            .bind(id)
            .execute(db.pool())
            .await
            .map_err(Error::database)?;

    if result.rows_affected() == 0 {
        return Err(Error::not_found(format!("trashed asset {id}")));
    }
    Ok(())
}

/// Permanently delete a trashed asset. Live assets must be soft-deleted first.
pub async fn purge(db: &Db, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM assets WHERE id = ? AND deleted_at IS NOT NULL")
        .bind(id)
        .execute(db.pool())
        .await
        .map_err(Error::database)?;

    if result.rows_affected() == 0 {
        return Err(Error::not_found(format!("trashed asset {id}")));
    }
    Ok(())
}

/// Import path: insert or overwrite by the natural key `tag`.
pub async fn upsert_by_tag(conn: &mut SqliteConnection, asset: &NewAsset) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO assets (tag, name, brand, vendor, division, assigned_to)
        VALUES (?, ?, ?, ?, ?, ?)
        ON CONFLICT(tag) DO UPDATE SET
            name = excluded.name,
            brand = excluded.brand,
            vendor = excluded.vendor,
            division = excluded.division,
            assigned_to = excluded.assigned_to
        "#,
    )
    .bind(&asset.tag)
    .bind(&asset.name)
    .bind(&asset.brand)
    .bind(&asset.vendor)
    .bind(&asset.division)
    .bind(&asset.assigned_to)
    .execute(conn)
    .await
    .map_err(Error::database)?;

    Ok(())
}
