//! SQLite data access layer for deskwatch.

pub mod assets;
pub mod cache;
pub mod client;
pub mod employees;
pub mod loans;
pub mod metrics;
pub mod schema;
pub mod settings;
pub mod tickets;

pub use cache::{dashboard_cache, DashboardCache, MonthSeries};
pub use client::{Db, StoreConfig};
pub use metrics::DailyStatusMetric;
