//! Internal metrics collection.
//!
//! In-memory counters for the rollup, import pipeline and scheduled jobs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// A counter metric.
#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_by(&self, n: u64) {
        self.0.fetch_add(n, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// A gauge metric (can go up or down).
#[derive(Debug, Default)]
pub struct Gauge(AtomicU64);

impl Gauge {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn set(&self, val: u64) {
        self.0.store(val, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Collected metrics for the deskwatch service.
#[derive(Debug, Default)]
pub struct Metrics {
    // Rollup job
    pub rollup_runs: Counter,
    pub rollup_failures: Counter,
    pub metric_rows_written: Counter,
    pub tickets_unknown_status: Counter,
    pub cache_evictions: Counter,

    // Other scheduled jobs
    pub loans_marked_overdue: Counter,
    pub backups_completed: Counter,
    pub backup_failures: Counter,

    // Import/export pipeline
    pub import_rows_accepted: Counter,
    pub import_rows_rejected: Counter,
    pub exports_served: Counter,

    // Gauges
    pub last_rollup_dates: Gauge,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes a snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            timestamp: Utc::now(),
            rollup_runs: self.rollup_runs.get(),
            rollup_failures: self.rollup_failures.get(),
            metric_rows_written: self.metric_rows_written.get(),
            tickets_unknown_status: self.tickets_unknown_status.get(),
            cache_evictions: self.cache_evictions.get(),
            loans_marked_overdue: self.loans_marked_overdue.get(),
            backups_completed: self.backups_completed.get(),
            backup_failures: self.backup_failures.get(),
            import_rows_accepted: self.import_rows_accepted.get(),
            import_rows_rejected: self.import_rows_rejected.get(),
            exports_served: self.exports_served.get(),
            last_rollup_dates: self.last_rollup_dates.get(),
        }
    }
}

/// A snapshot of metrics at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub timestamp: DateTime<Utc>,
    pub rollup_runs: u64,
    pub rollup_failures: u64,
    pub metric_rows_written: u64,
    pub tickets_unknown_status: u64,
    pub cache_evictions: u64,
    pub loans_marked_overdue: u64,
    pub backups_completed: u64,
    pub backup_failures: u64,
    pub import_rows_accepted: u64,
    pub import_rows_rejected: u64,
    pub exports_served: u64,
    pub last_rollup_dates: u64,
}

/// Global metrics registry.
pub static METRICS: std::sync::LazyLock<Metrics> = std::sync::LazyLock::new(Metrics::new);

/// Get the global metrics instance.
pub fn metrics() -> &'static Metrics {
    &METRICS
}
