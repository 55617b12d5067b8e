//! Admin endpoints.

use axum::extract::State;
use axum::Json;
use worker::rollup::{RollupSummary, RollupWorker};

use crate::response::ApiError;
use crate::state::AppState;

/// POST /admin/rebuild-metrics - On-demand rollup run.
pub async fn rebuild_metrics(
    State(state): State<AppState>,
) -> Result<Json<RollupSummary>, ApiError> {
    let worker = RollupWorker::new(state.db.clone(), state.cache.clone(), state.zone);
    let summary = worker.run().await?;
    Ok(Json(summary))
}
