//! Overdue loan sweep.

use chrono::Utc;
use desk_core::Result;
use store::{loans, Db};
use telemetry::metrics;
use tracing::info;

/// Worker that flips ongoing loans past their due date to overdue.
pub struct OverdueWorker {
    db: Db,
}

impl OverdueWorker {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Run one sweep. Returns the number of loans marked overdue.
    pub async fn run(&self) -> Result<u64> {
        let flipped = loans::sweep_overdue(&self.db, Utc::now()).await?;

        if flipped > 0 {
            metrics().loans_marked_overdue.inc_by(flipped);
            info!(loans = flipped, "Marked loans overdue");
        }

        Ok(flipped)
    }
}
