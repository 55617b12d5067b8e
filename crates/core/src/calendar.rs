//! Calendar and time-zone helpers for the rollup.
//!
//! Every day boundary in the system goes through this module so the whole
//! batch sees the same configured zone.

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{Error, Result};

/// Default zone for day boundaries when none is configured.
pub const DEFAULT_TIMEZONE: &str = "Asia/Jakarta";

/// Parse a zone name, failing fast before any computation uses it.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| Error::InvalidTimeZone(name.to_string()))
}

/// Today's calendar date in the given zone.
pub fn today_in(zone: Tz) -> NaiveDate {
    Utc::now().with_timezone(&zone).date_naive()
}

/// First day of the month containing `date`.
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).expect("day 1 exists in every month")
}

/// The last instant of `date` in `zone`, as a UTC cutoff for history lookups.
///
/// Ambiguous local times (DST fall-back) resolve to the later instant so the
/// whole local day is covered; times skipped by a DST gap resolve to the
/// first valid instant after.
pub fn end_of_day_utc(date: NaiveDate, zone: Tz) -> DateTime<Utc> {
    let end = NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999).expect("valid time of day");
    let naive = date.and_time(end);

    match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(_, latest) => latest.with_timezone(&Utc),
        LocalResult::None => zone
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive)),
    }
}

/// Ascending dates from `start` through `end`, inclusive.
pub fn dates_through(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = start;
    while current <= end {
        dates.push(current);
        current = current.succ_opt().expect("date range within calendar bounds");
    }
    dates
}

/// The `YYYY-MM` month key for a date.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Cache key for the monthly dashboard aggregate.
pub fn dashboard_cache_key(date: NaiveDate) -> String {
    format!("dashboard:dailyTicketStatus:{}", month_key(date))
}
