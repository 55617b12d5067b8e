//! SQLite pool wrapper.

use std::str::FromStr;
use std::time::Duration;

use desk_core::{Error, Result};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::info;

/// Store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the database file.
    pub path: String,
    /// Connection pool size
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Busy timeout in seconds
    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    5
}

fn default_busy_timeout_secs() -> u64 {
    5
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: "deskwatch.sqlite".to_string(),
            max_connections: default_max_connections(),
            busy_timeout_secs: default_busy_timeout_secs(),
        }
    }
}

/// SQLite pool wrapper shared by the API and the workers.
#[derive(Clone)]
pub struct Db {
    pool: SqlitePool,
    config: StoreConfig,
}

impl Db {
    /// Open (or create) the database file and connect the pool.
    pub async fn connect(config: StoreConfig) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(config.busy_timeout_secs));

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .map_err(Error::database)?;

        info!(path = %config.path, "Opened SQLite database");

        Ok(Self { pool, config })
    }

    /// In-memory database on a single connection, for tests.
    pub async fn connect_in_memory() -> Result<Self> {
        let options =
            SqliteConnectOptions::from_str("sqlite::memory:").map_err(Error::database)?;

        // One connection: each SQLite in-memory connection is its own database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(Error::database)?;

        Ok(Self {
            pool,
            config: StoreConfig {
                path: ":memory:".to_string(),
                ..StoreConfig::default()
            },
        })
    }

    /// Returns the inner pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}
