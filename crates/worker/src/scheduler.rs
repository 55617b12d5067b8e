//! Worker scheduler for background jobs.
//!
//! Each job runs on its own sequential loop, so two runs of the same job
//! never overlap. Loops tick on a short interval and fire when the job's
//! local wall-clock time comes due.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use desk_core::{AppSettings, BackupFrequency};
use telemetry::health;
use tokio::time::interval;
use tracing::{error, info};

use store::{DashboardCache, Db};

use crate::backup::{backup_due, BackupWorker};
use crate::overdue::OverdueWorker;
use crate::rollup::RollupWorker;

/// Scheduled job configuration. Times are local to the configured zone.
#[derive(Debug, Clone)]
pub struct JobsConfig {
    /// Due-check tick interval
    pub tick_interval: Duration,
    /// Daily metrics rollup time
    pub rollup_hour: u32,
    pub rollup_minute: u32,
    /// Daily overdue-loan sweep time
    pub sweep_hour: u32,
    pub sweep_minute: u32,
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(60),
            rollup_hour: 0,
            rollup_minute: 5,
            sweep_hour: 0,
            sweep_minute: 30,
        }
    }
}

/// Tracks the last local date a daily job fired.
#[derive(Debug, Default)]
struct DailyDue {
    last_run: Option<NaiveDate>,
}

impl DailyDue {
    /// Fires at most once per local day, once the configured time has passed.
    fn due(&mut self, now_local: DateTime<Tz>, hour: u32, minute: u32) -> bool {
        let today = now_local.date_naive();
        if self.last_run == Some(today) {
            return false;
        }
        if (now_local.hour(), now_local.minute()) < (hour, minute) {
            return false;
        }
        self.last_run = Some(today);
        true
    }
}

/// Background worker scheduler.
pub struct WorkerScheduler {
    config: JobsConfig,
    db: Db,
    cache: DashboardCache,
    zone: Tz,
    /// Settings snapshot taken at construction; jobs never re-read it.
    settings: AppSettings,
    backup_dir: PathBuf,
}

impl WorkerScheduler {
    pub fn new(
        config: JobsConfig,
        db: Db,
        cache: DashboardCache,
        zone: Tz,
        settings: AppSettings,
        backup_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config,
            db,
            cache,
            zone,
            settings,
            backup_dir: backup_dir.into(),
        }
    }

    /// Starts all background job loops.
    pub fn start(self: Arc<Self>) -> Vec<tokio::task::JoinHandle<()>> {
        let mut handles = Vec::new();

        let scheduler = self.clone();
        handles.push(tokio::spawn(async move {
            scheduler.run_rollup_loop().await;
        }));

        let scheduler = self.clone();
        handles.push(tokio::spawn(async move {
            scheduler.run_sweep_loop().await;
        }));

        if self.settings.backup_frequency == BackupFrequency::Off {
            info!("Backup job disabled in settings");
        } else {
            let scheduler = self.clone();
            handles.push(tokio::spawn(async move {
                scheduler.run_backup_loop().await;
            }));
        }

        health().workers.set_healthy();
        info!("Background workers started");
        handles
    }

    fn now_local(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.zone)
    }

    async fn run_rollup_loop(&self) {
        let worker = RollupWorker::new(self.db.clone(), self.cache.clone(), self.zone);
        let mut due = DailyDue::default();
        let mut ticker = interval(self.config.tick_interval);

        loop {
            ticker.tick().await;

            if due.due(self.now_local(), self.config.rollup_hour, self.config.rollup_minute) {
                if let Err(e) = worker.run().await {
                    error!("Metrics rollup error: {}", e);
                }
            }
        }
    }

    async fn run_sweep_loop(&self) {
        let worker = OverdueWorker::new(self.db.clone());
        let mut due = DailyDue::default();
        let mut ticker = interval(self.config.tick_interval);

        loop {
            ticker.tick().await;

            if due.due(self.now_local(), self.config.sweep_hour, self.config.sweep_minute) {
                if let Err(e) = worker.run().await {
                    error!("Overdue sweep error: {}", e);
                }
            }
        }
    }

    async fn run_backup_loop(&self) {
        let worker = BackupWorker::new(self.db.clone(), self.backup_dir.clone());
        let mut last_run: Option<NaiveDate> = None;
        let mut ticker = interval(self.config.tick_interval);

        loop {
            ticker.tick().await;

            let now_local = self.now_local();
            if backup_due(&self.settings, last_run, now_local) {
                last_run = Some(now_local.date_naive());
                if let Err(e) = worker.run(Utc::now()).await {
                    error!("Backup error: {}", e);
                }
            }
        }
    }
}
