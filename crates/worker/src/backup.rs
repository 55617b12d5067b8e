//! Conditional backup job.
//!
//! Cadence comes from the settings row, read once at scheduler construction.
//! The backup itself is a `VACUUM INTO` snapshot of the live database.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use desk_core::{AppSettings, BackupFrequency, Error, Result};
use store::Db;
use telemetry::metrics;
use tracing::info;

/// Worker that snapshots the database on the configured cadence.
pub struct BackupWorker {
    db: Db,
    backup_dir: PathBuf,
}

impl BackupWorker {
    pub fn new(db: Db, backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            db,
            backup_dir: backup_dir.into(),
        }
    }

    /// Snapshot the database into a timestamped file.
    pub async fn run(&self, now: DateTime<Utc>) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.backup_dir)?;

        let target = self
            .backup_dir
            .join(format!("deskwatch-{}.sqlite", now.format("%Y%m%d-%H%M%S")));

        let result = vacuum_into(&self.db, &target).await;
        match result {
            Ok(()) => {
                metrics().backups_completed.inc();
                info!(target = %target.display(), "Backup complete");
                Ok(target)
            }
            Err(e) => {
                metrics().backup_failures.inc();
                Err(e)
            }
        }
    }
}

async fn vacuum_into(db: &Db, target: &Path) -> Result<()> {
    // VACUUM cannot run with bound parameters; the path is service-generated.
    let sql = format!("VACUUM INTO '{}'", target.display());
    sqlx::query(&sql)
        .execute(db.pool())
        .await
        .map_err(Error::database)?;
    Ok(())
}

/// Whether a backup is due at `now_local`, given the last local date one ran.
///
/// At most one backup per local day; a job that fails is not retried until
/// the next cadence point (retry policy belongs to the operator).
pub fn backup_due(
    settings: &AppSettings,
    last_run: Option<NaiveDate>,
    now_local: DateTime<Tz>,
) -> bool {
    let today = now_local.date_naive();
    if last_run == Some(today) {
        return false;
    }
    if (now_local.hour(), now_local.minute()) < (settings.backup_hour, settings.backup_minute) {
        return false;
    }

    match settings.backup_frequency {
        BackupFrequency::Off => false,
        BackupFrequency::Daily => true,
        BackupFrequency::Weekly => today.weekday() == settings.weekday(),
        BackupFrequency::Monthly => today.day() == settings.backup_day_of_month,
    }
}
