//! Background jobs for deskwatch.
//!
//! - Rollup (daily ticket status metrics rebuild + cache eviction)
//! - Overdue sweep (ongoing loans past due become overdue)
//! - Backup (admin-configured cadence, VACUUM INTO)
//! - Scheduler (one sequential loop per job)

pub mod backup;
pub mod overdue;
pub mod rollup;
pub mod scheduler;

pub use backup::BackupWorker;
pub use overdue::OverdueWorker;
pub use rollup::{RollupSummary, RollupWorker};
pub use scheduler::{JobsConfig, WorkerScheduler};
