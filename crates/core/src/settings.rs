//! Admin-configured settings.
//!
//! Loaded once from the settings row during startup and passed into the
//! scheduler; never re-read ad hoc by jobs.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Backup cadence configured in the admin settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackupFrequency {
    Off,
    Daily,
    Weekly,
    Monthly,
}

impl BackupFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "off" => Some(Self::Off),
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }
}

/// The settings singleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    pub backup_frequency: BackupFrequency,
    /// Local wall-clock hour for the backup job.
    pub backup_hour: u32,
    pub backup_minute: u32,
    /// Day of week for weekly cadence, 0 = Monday.
    pub backup_weekday: u32,
    /// Day of month for monthly cadence, 1-28.
    pub backup_day_of_month: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            backup_frequency: BackupFrequency::Off,
            backup_hour: 1,
            backup_minute: 0,
            backup_weekday: 0,
            backup_day_of_month: 1,
        }
    }
}

impl AppSettings {
    /// The configured weekday, clamped into range.
    pub fn weekday(&self) -> Weekday {
        match self.backup_weekday % 7 {
            0 => Weekday::Mon,
            1 => Weekday::Tue,
            2 => Weekday::Wed,
            3 => Weekday::Thu,
            4 => Weekday::Fri,
            5 => Weekday::Sat,
            _ => Weekday::Sun,
        }
    }
}
