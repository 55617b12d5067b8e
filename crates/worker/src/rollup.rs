//! Daily metrics rebuilder.
//!
//! Recomputes the per-day ticket status snapshot for every date from the
//! start of the current month (in the configured zone) through today, then
//! evicts the cached monthly dashboard aggregate. All per-date upserts run
//! in one transaction; a failure anywhere rolls back the whole batch and
//! leaves the cache untouched.

use std::collections::BTreeSet;

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use desk_core::{calendar, Error, Result, StatusCounts};
use serde::Serialize;
use store::{metrics as metric_store, DashboardCache, Db};
use telemetry::metrics;
use tracing::{info, warn};

/// Worker that rebuilds `daily_ticket_status_metrics`.
pub struct RollupWorker {
    db: Db,
    cache: DashboardCache,
    zone: Tz,
}

/// Outcome of one successful rollup run.
#[derive(Debug, Clone, Serialize)]
pub struct RollupSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub dates_written: u64,
    /// Tickets whose derived status fell outside the fixed bucket set.
    pub tickets_unknown_status: u64,
}

impl RollupWorker {
    pub fn new(db: Db, cache: DashboardCache, zone: Tz) -> Self {
        Self { db, cache, zone }
    }

    /// Scheduled entry point: rebuild the current month through today.
    pub async fn run(&self) -> Result<RollupSummary> {
        self.rebuild_month(calendar::today_in(self.zone)).await
    }

    /// Rebuild `[startOfMonth(today), today]`.
    pub async fn rebuild_month(&self, today: NaiveDate) -> Result<RollupSummary> {
        self.rebuild_range(calendar::start_of_month(today), today).await
    }

    /// Rebuild an explicit inclusive date range, ascending.
    pub async fn rebuild_range(&self, start: NaiveDate, end: NaiveDate) -> Result<RollupSummary> {
        metrics().rollup_runs.inc();

        match self.rebuild_range_inner(start, end).await {
            Ok(summary) => {
                metrics().metric_rows_written.inc_by(summary.dates_written);
                metrics().last_rollup_dates.set(summary.dates_written);
                metrics()
                    .tickets_unknown_status
                    .inc_by(summary.tickets_unknown_status);

                info!(
                    start = %summary.start,
                    end = %summary.end,
                    dates_written = summary.dates_written,
                    "Metrics rollup complete"
                );
                Ok(summary)
            }
            Err(e) => {
                metrics().rollup_failures.inc();
                Err(e)
            }
        }
    }

    async fn rebuild_range_inner(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RollupSummary> {
        if start > end {
            return Err(Error::validation(format!(
                "rollup range start {start} is after end {end}"
            )));
        }

        let updated_at = Utc::now();
        let mut tx = self.db.pool().begin().await.map_err(Error::database)?;

        let mut dates_written = 0u64;
        let mut unknown_total = 0u64;

        for date in calendar::dates_through(start, end) {
            let cutoff = calendar::end_of_day_utc(date, self.zone);
            let rows = metric_store::derived_status_counts(&mut *tx, cutoff).await?;

            let (counts, unknown) =
                StatusCounts::from_rows(rows.iter().map(|r| (r.status.as_str(), r.tickets)));

            for (status, tickets) in &unknown {
                warn!(
                    date = %date,
                    status = %status,
                    tickets = tickets,
                    "Derived status outside the fixed bucket set, not counted"
                );
                unknown_total += *tickets as u64;
            }

            metric_store::upsert_daily_metric(&mut *tx, date, &counts, updated_at).await?;
            dates_written += 1;
        }

        tx.commit().await.map_err(Error::database)?;

        // Eviction only after a successful commit: a failed batch leaves the
        // cached aggregate serving the previous state.
        self.evict_cached_months(start, end).await;

        Ok(RollupSummary {
            start,
            end,
            dates_written,
            tickets_unknown_status: unknown_total,
        })
    }

    async fn evict_cached_months(&self, start: NaiveDate, end: NaiveDate) {
        let keys: BTreeSet<String> = calendar::dates_through(start, end)
            .into_iter()
            .map(calendar::dashboard_cache_key)
            .collect();

        for key in keys {
            self.cache.invalidate(&key).await;
            metrics().cache_evictions.inc();
        }
    }
}
