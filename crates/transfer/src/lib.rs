//! Bulk CSV import/export.
//!
//! Import is a per-row validate-then-upsert loop: invalid rows are skipped
//! and reported, never aborting the batch. Export streams live records.

pub mod export;
pub mod import;

pub use export::{export_assets, export_employees, export_tickets};
pub use import::{import_assets, import_employees, ImportReport, RowFailure};
