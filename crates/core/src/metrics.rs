//! Per-status count buckets for the daily metrics rollup.

use serde::{Deserialize, Serialize};

use crate::status::TicketStatus;

/// Ticket counts per status bucket for one calendar date.
///
/// Always carries all five buckets; a status with no tickets stays zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub open: i64,
    pub in_progress: i64,
    pub resolved: i64,
    pub closed: i64,
    pub cancelled: i64,
}

impl StatusCounts {
    pub fn record(&mut self, status: TicketStatus, count: i64) {
        match status {
            TicketStatus::Open => self.open += count,
            TicketStatus::InProgress => self.in_progress += count,
            TicketStatus::Resolved => self.resolved += count,
            TicketStatus::Closed => self.closed += count,
            TicketStatus::Cancelled => self.cancelled += count,
        }
    }

    pub fn get(&self, status: TicketStatus) -> i64 {
        match status {
            TicketStatus::Open => self.open,
            TicketStatus::InProgress => self.in_progress,
            TicketStatus::Resolved => self.resolved,
            TicketStatus::Closed => self.closed,
            TicketStatus::Cancelled => self.cancelled,
        }
    }

    pub fn total(&self) -> i64 {
        TicketStatus::ALL.iter().map(|s| self.get(*s)).sum()
    }

    /// Bucket raw `(status, count)` aggregation rows.
    ///
    /// Statuses outside the fixed set are not bucketed; they are returned
    /// separately so the caller can observe the undercount.
    pub fn from_rows<'a, I>(rows: I) -> (Self, Vec<(String, i64)>)
    where
        I: IntoIterator<Item = (&'a str, i64)>,
    {
        let mut counts = Self::default();
        let mut unknown = Vec::new();

        for (status, count) in rows {
            match TicketStatus::parse(status) {
                Some(s) => counts.record(s, count),
                None => unknown.push((status.to_string(), count)),
            }
        }

        (counts, unknown)
    }
}
