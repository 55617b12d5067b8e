//! Ticket creation and status transitions.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use desk_core::TicketStatus;
use serde::Deserialize;
use store::tickets::{self, Ticket};
use validator::Validate;

use crate::response::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct TicketPayload {
    #[validate(length(min = 1, message = "subject is required"))]
    pub subject: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusPayload {
    pub status: String,
}

/// GET /tickets
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Ticket>>, ApiError> {
    Ok(Json(tickets::list(&state.db).await?))
}

/// POST /tickets - Opens a ticket and writes the first history row.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<TicketPayload>,
) -> Result<(StatusCode, Json<Ticket>), ApiError> {
    payload.validate()?;
    let ticket = tickets::create(&state.db, &payload.subject, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// POST /tickets/:id/status - Transition, appending a history row.
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<StatusPayload>,
) -> Result<Json<Ticket>, ApiError> {
    let status = TicketStatus::parse(&payload.status)
        .ok_or_else(|| ApiError::bad_request(format!("unknown status: {}", payload.status)))?;
    Ok(Json(tickets::set_status(&state.db, id, status, Utc::now()).await?))
}

/// GET /tickets/export - CSV of all tickets with their current status.
pub async fn export(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let csv = transfer::export_tickets(&state.db).await?;
    Ok(([(header::CONTENT_TYPE, "text/csv")], csv))
}
