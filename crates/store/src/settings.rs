//! The settings singleton row.

use desk_core::{AppSettings, BackupFrequency, Error, Result};
use sqlx::FromRow;
use tracing::warn;

use crate::client::Db;

#[derive(Debug, FromRow)]
struct SettingsRow {
    backup_frequency: String,
    backup_hour: i64,
    backup_minute: i64,
    backup_weekday: i64,
    backup_day_of_month: i64,
}

/// Load the settings singleton. The row is seeded by `init_schema`, so a
/// missing row is a schema-bootstrap bug.
pub async fn load(db: &Db) -> Result<AppSettings> {
    let row = sqlx::query_as::<_, SettingsRow>(
        r#"
        SELECT backup_frequency, backup_hour, backup_minute, backup_weekday, backup_day_of_month
        FROM settings WHERE id = 1
        "#,
    )
    .fetch_optional(db.pool())
    .await
    .map_err(Error::database)?
    .ok_or_else(|| Error::internal("settings row missing; schema not initialized"))?;

    let frequency = BackupFrequency::parse(&row.backup_frequency).unwrap_or_else(|| {
        warn!(value = %row.backup_frequency, "Unknown backup frequency in settings, treating as off");
        BackupFrequency::Off
    });

    Ok(AppSettings {
        backup_frequency: frequency,
        backup_hour: row.backup_hour.clamp(0, 23) as u32,
        backup_minute: row.backup_minute.clamp(0, 59) as u32,
        backup_weekday: row.backup_weekday.clamp(0, 6) as u32,
        backup_day_of_month: row.backup_day_of_month.clamp(1, 28) as u32,
    })
}

/// Overwrite the settings singleton.
pub async fn save(db: &Db, settings: &AppSettings) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE settings
        SET backup_frequency = ?, backup_hour = ?, backup_minute = ?,
            backup_weekday = ?, backup_day_of_month = ?
        WHERE id = 1
        "#,
    )
    .bind(settings.backup_frequency.as_str())
    .bind(settings.backup_hour as i64)
    .bind(settings.backup_minute as i64)
    .bind(settings.backup_weekday as i64)
    .bind(settings.backup_day_of_month as i64)
    .execute(db.pool())
    .await
    .map_err(Error::database)?;

    Ok(())
}
