//! Monthly dashboard aggregate.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::{Datelike, NaiveDate};
use desk_core::calendar;
use serde::{Deserialize, Serialize};
use store::{metrics as metric_store, DailyStatusMetric};
use tracing::debug;

use crate::response::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// `YYYY-MM`; defaults to the current month in the configured zone.
    pub month: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub month: String,
    pub days: Vec<DailyStatusMetric>,
}

/// GET /dashboard/daily-ticket-status - Read-through cached month series.
pub async fn daily_ticket_status(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let first_of_month = match &query.month {
        Some(raw) => parse_month(raw)?,
        None => calendar::start_of_month(calendar::today_in(state.zone)),
    };
    let key = calendar::dashboard_cache_key(first_of_month);

    let series = match state.cache.get(&key).await {
        Some(cached) => {
            debug!(key = %key, "Dashboard cache hit");
            cached
        }
        None => {
            let rows =
                metric_store::month_series(&state.db, first_of_month.year(), first_of_month.month())
                    .await?;
            let series = Arc::new(rows);
            state.cache.insert(key, series.clone()).await;
            series
        }
    };

    Ok(Json(DashboardResponse {
        month: calendar::month_key(first_of_month),
        days: (*series).clone(),
    }))
}

fn parse_month(raw: &str) -> Result<NaiveDate, ApiError> {
    let (year, month) = raw
        .split_once('-')
        .and_then(|(y, m)| Some((y.parse::<i32>().ok()?, m.parse::<u32>().ok()?)))
        .ok_or_else(|| ApiError::bad_request(format!("invalid month: {raw}")))?;

    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| ApiError::bad_request(format!("invalid month: {raw}")))
}
