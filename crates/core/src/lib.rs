//! Core types, status and calendar logic for the deskwatch back office.

pub mod calendar;
pub mod error;
pub mod metrics;
pub mod settings;
pub mod status;

pub use error::{Error, Result};
pub use metrics::StatusCounts;
pub use settings::{AppSettings, BackupFrequency};
pub use status::TicketStatus;
