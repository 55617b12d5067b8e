//! Application state shared across handlers.

use chrono_tz::Tz;
use store::{DashboardCache, Db};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// SQLite pool wrapper
    pub db: Db,
    /// Monthly dashboard aggregate cache
    pub cache: DashboardCache,
    /// Zone for day boundaries, parsed once at startup
    pub zone: Tz,
}

impl AppState {
    pub fn new(db: Db, cache: DashboardCache, zone: Tz) -> Self {
        Self { db, cache, zone }
    }
}
