//! Internal telemetry: tracing setup, in-memory metrics, health registry.

pub mod health;
pub mod metrics;
pub mod tracing_setup;

pub use health::{health, HealthReport, HealthStatus};
pub use metrics::{metrics, Metrics, MetricsSnapshot};
pub use tracing_setup::{init_tracing, init_tracing_from_env, TracingConfig};
