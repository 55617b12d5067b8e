//! Deskwatch back-office service
//!
//! Asset and helpdesk tracking with:
//! - Daily ticket status metrics rollup and cached dashboard aggregates
//! - Scheduled jobs: rollup, overdue-loan sweep, conditional backup
//! - Bulk CSV import/export for assets and employees

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::info;

use api::{router, AppState};
use desk_core::calendar;
use store::{dashboard_cache, schema, settings, Db, StoreConfig};
use telemetry::{health, init_tracing_from_env};
use worker::{JobsConfig, WorkerScheduler};

/// Application configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,

    /// Zone for day boundaries (rollup cutoffs, job scheduling)
    #[serde(default = "default_timezone")]
    timezone: String,

    /// Directory for backup snapshots
    #[serde(default = "default_backup_dir")]
    backup_dir: String,

    #[serde(default)]
    store: StoreConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timezone() -> String {
    calendar::DEFAULT_TIMEZONE.to_string()
}

fn default_backup_dir() -> String {
    "backups".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timezone: default_timezone(),
            backup_dir: default_backup_dir(),
            store: StoreConfig::default(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing_from_env();

    info!("Starting deskwatch v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = load_config()?;

    // Parse the zone before anything computes a day boundary with it
    let zone = calendar::parse_timezone(&config.timezone)
        .with_context(|| format!("Invalid timezone: {}", config.timezone))?;
    info!(zone = %zone, "Using timezone");

    // Open the database and bootstrap the schema
    let db = Db::connect(config.store.clone())
        .await
        .context("Failed to open database")?;
    schema::init_schema(&db)
        .await
        .context("Failed to initialize schema")?;
    health().database.set_healthy();

    // Settings snapshot for the scheduler
    let app_settings = settings::load(&db).await.context("Failed to load settings")?;

    // Dashboard aggregate cache, shared by the API and the rollup worker
    let cache = dashboard_cache();

    // Start background job loops
    let scheduler = Arc::new(WorkerScheduler::new(
        JobsConfig::default(),
        db.clone(),
        cache.clone(),
        zone,
        app_settings,
        &config.backup_dir,
    ));
    let _worker_handles = scheduler.start();

    // Create application state and router
    let state = AppState::new(db, cache, zone);
    let app = router(state);

    // Start HTTP server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid server address")?;

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutdown complete");
    Ok(())
}

/// Load configuration from files and environment.
fn load_config() -> Result<Config> {
    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?)
        // Load from config file if exists
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix("DESKWATCH")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let mut config: Config = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    // Manual override for the nested store path; the config crate's nested
    // parsing is unreliable with underscored field names
    if let Ok(path) = std::env::var("DESKWATCH_STORE_PATH") {
        config.store.path = path;
    }

    Ok(config)
}

/// Wait for a shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
