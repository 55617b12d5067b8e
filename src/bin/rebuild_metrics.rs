//! Manual metrics rebuild.
//!
//! Runs one rollup over the current month and exits: 0 on success, non-zero
//! on failure. Takes no arguments; configuration comes from the environment
//! (`DESKWATCH_STORE_PATH`, `DESKWATCH_TIMEZONE`).

use anyhow::{Context, Result};
use tracing::info;

use desk_core::calendar;
use store::{dashboard_cache, schema, Db, StoreConfig};
use telemetry::init_tracing_from_env;
use worker::RollupWorker;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing_from_env();

    let timezone =
        std::env::var("DESKWATCH_TIMEZONE").unwrap_or_else(|_| calendar::DEFAULT_TIMEZONE.into());
    let zone = calendar::parse_timezone(&timezone)
        .with_context(|| format!("Invalid timezone: {timezone}"))?;

    let mut store_config = StoreConfig::default();
    if let Ok(path) = std::env::var("DESKWATCH_STORE_PATH") {
        store_config.path = path;
    }

    let db = Db::connect(store_config)
        .await
        .context("Failed to open database")?;
    schema::init_schema(&db)
        .await
        .context("Failed to initialize schema")?;

    // Fresh process, fresh cache; the running service's cache expires on TTL.
    let worker = RollupWorker::new(db, dashboard_cache(), zone);
    let summary = worker.run().await.context("Rollup failed")?;

    info!(
        start = %summary.start,
        end = %summary.end,
        dates_written = summary.dates_written,
        "Rebuild complete"
    );
    Ok(())
}
