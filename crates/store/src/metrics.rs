//! Daily ticket status metrics: rollup queries and the keyed upsert.

use chrono::{DateTime, Months, NaiveDate, Utc};
use desk_core::{Error, Result, StatusCounts};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteConnection};

use crate::client::Db;

/// One stored metrics row: counts per status bucket as of end of `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DailyStatusMetric {
    pub date: NaiveDate,
    pub open: i64,
    pub in_progress: i64,
    pub resolved: i64,
    pub closed: i64,
    pub cancelled: i64,
    pub updated_at: DateTime<Utc>,
}

impl DailyStatusMetric {
    pub fn counts(&self) -> StatusCounts {
        StatusCounts {
            open: self.open,
            in_progress: self.in_progress,
            resolved: self.resolved,
            closed: self.closed,
            cancelled: self.cancelled,
        }
    }
}

/// Raw aggregation row: a derived status and the tickets holding it.
#[derive(Debug, FromRow)]
pub struct StatusCountRow {
    pub status: String,
    pub tickets: i64,
}

/// Latest-row-per-ticket aggregation up to a cutoff.
///
/// Tie-break for identical `changed_at`: highest row id (insertion order).
const DERIVED_STATUS_SQL: &str = r#"
SELECT status, COUNT(*) AS tickets
FROM (
    SELECT ticket_id, status,
           ROW_NUMBER() OVER (
               PARTITION BY ticket_id
               ORDER BY changed_at DESC, id DESC
           ) AS rn
    FROM ticket_status_histories
    WHERE changed_at <= ?
)
WHERE rn = 1
GROUP BY status
"#;

/// For each ticket with any history at or before `cutoff`, derive its latest
/// status and return counts grouped by status string.
pub async fn derived_status_counts(
    conn: &mut SqliteConnection,
    cutoff: DateTime<Utc>,
) -> Result<Vec<StatusCountRow>> {
    sqlx::query_as::<_, StatusCountRow>(DERIVED_STATUS_SQL)
        .bind(cutoff)
        .fetch_all(conn)
        .await
        .map_err(Error::database)
}

/// Insert or overwrite the metrics row for `date`. All five buckets are
/// written, zero-defaulted by `StatusCounts`.
pub async fn upsert_daily_metric(
    conn: &mut SqliteConnection,
    date: NaiveDate,
    counts: &StatusCounts,
    updated_at: DateTime<Utc>,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO daily_ticket_status_metrics
            (date, open, in_progress, resolved, closed, cancelled, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(date) DO UPDATE SET
            open = excluded.open,
            in_progress = excluded.in_progress,
            resolved = excluded.resolved,
            closed = excluded.closed,
            cancelled = excluded.cancelled,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(date)
    .bind(counts.open)
    .bind(counts.in_progress)
    .bind(counts.resolved)
    .bind(counts.closed)
    .bind(counts.cancelled)
    .bind(updated_at)
    .execute(conn)
    .await
    .map_err(Error::database)?;

    Ok(())
}

/// All metric rows for one calendar month, ascending by date.
pub async fn month_series(db: &Db, year: i32, month: u32) -> Result<Vec<DailyStatusMetric>> {
    let (start, end) = month_bounds(year, month)?;

    sqlx::query_as::<_, DailyStatusMetric>(
        r#"
        SELECT date, open, in_progress, resolved, closed, cancelled, updated_at
        FROM daily_ticket_status_metrics
        WHERE date BETWEEN ? AND ?
        ORDER BY date
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(db.pool())
    .await
    .map_err(Error::database)
}

/// The metrics row for one date, if the rollup has written it.
pub async fn metric_for(db: &Db, date: NaiveDate) -> Result<Option<DailyStatusMetric>> {
    sqlx::query_as::<_, DailyStatusMetric>(
        r#"
        SELECT date, open, in_progress, resolved, closed, cancelled, updated_at
        FROM daily_ticket_status_metrics
        WHERE date = ?
        "#,
    )
    .bind(date)
    .fetch_optional(db.pool())
    .await
    .map_err(Error::database)
}

fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| Error::validation(format!("invalid month: {year}-{month:02}")))?;
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| Error::validation(format!("month out of range: {year}-{month:02}")))?;
    Ok((start, end))
}
