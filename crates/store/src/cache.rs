//! Dashboard aggregate cache.
//!
//! Advisory and always reconstructable from `daily_ticket_status_metrics`;
//! the rollup evicts the current month's key after each successful commit.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use crate::metrics::DailyStatusMetric;

/// Cached value: one month's metric rows, ascending by date.
pub type MonthSeries = Arc<Vec<DailyStatusMetric>>;

/// Cache keyed by `dashboard:dailyTicketStatus:<YYYY-MM>`.
pub type DashboardCache = Cache<String, MonthSeries>;

/// Max cached months.
const CACHE_MAX_CAPACITY: u64 = 128;

/// TTL safety net for readers racing an eviction.
const CACHE_TTL: Duration = Duration::from_secs(3600);

pub fn dashboard_cache() -> DashboardCache {
    Cache::builder()
        .max_capacity(CACHE_MAX_CAPACITY)
        .time_to_live(CACHE_TTL)
        .build()
}
