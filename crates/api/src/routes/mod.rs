//! API routes.

pub mod admin;
pub mod assets;
pub mod dashboard;
pub mod employees;
pub mod health;
pub mod loans;
pub mod settings;
pub mod tickets;
pub mod trash;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::state::AppState;

/// Creates the API router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/health/ready", get(health::ready_handler))
        .route("/health/live", get(health::live_handler))
        .route(
            "/dashboard/daily-ticket-status",
            get(dashboard::daily_ticket_status),
        )
        .route("/admin/rebuild-metrics", post(admin::rebuild_metrics))
        .route("/assets", get(assets::list).post(assets::create))
        .route("/assets/import", post(assets::import))
        .route("/assets/export", get(assets::export))
        .route(
            "/assets/:id",
            get(assets::get_one).put(assets::update).delete(assets::remove),
        )
        .route("/employees", get(employees::list).post(employees::create))
        .route("/employees/import", post(employees::import))
        .route("/employees/export", get(employees::export))
        .route(
            "/employees/:id",
            get(employees::get_one)
                .put(employees::update)
                .delete(employees::remove),
        )
        .route("/tickets", get(tickets::list).post(tickets::create))
        .route("/tickets/export", get(tickets::export))
        .route("/tickets/:id/status", post(tickets::set_status))
        .route("/loans", get(loans::list).post(loans::create))
        .route("/loans/:id/return", post(loans::mark_returned))
        .route("/trash/assets", get(trash::list_assets))
        .route("/trash/assets/:id/restore", post(trash::restore_asset))
        .route("/trash/assets/:id", delete(trash::purge_asset))
        .route("/trash/employees", get(trash::list_employees))
        .route("/trash/employees/:id/restore", post(trash::restore_employee))
        .route("/trash/employees/:id", delete(trash::purge_employee))
        .route(
            "/settings",
            get(settings::get_settings).put(settings::put_settings),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
