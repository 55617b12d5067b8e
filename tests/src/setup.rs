//! Common test setup functions.

use api::{router, AppState};
use axum::Router;
use chrono_tz::Tz;
use desk_core::calendar;
use store::{dashboard_cache, schema, DashboardCache, Db};
use telemetry::health;
use worker::RollupWorker;

/// Test context over an in-memory SQLite database.
///
/// Exercises the production code paths: the real axum router with all
/// middleware, the real store, and the real rollup worker.
pub struct TestContext {
    pub db: Db,
    pub cache: DashboardCache,
    pub zone: Tz,
    pub router: Router,
}

impl TestContext {
    /// Create a new test context with schema initialized.
    pub async fn new() -> Self {
        let db = Db::connect_in_memory()
            .await
            .expect("Failed to open in-memory database");
        schema::init_schema(&db)
            .await
            .expect("Failed to initialize schema");
        health().database.set_healthy();

        let cache = dashboard_cache();
        let zone = calendar::parse_timezone(calendar::DEFAULT_TIMEZONE)
            .expect("default timezone parses");

        let state = AppState::new(db.clone(), cache.clone(), zone);
        let router = router(state);

        Self {
            db,
            cache,
            zone,
            router,
        }
    }

    /// A rollup worker wired to this context's database and cache.
    pub fn rollup_worker(&self) -> RollupWorker {
        RollupWorker::new(self.db.clone(), self.cache.clone(), self.zone)
    }
}
