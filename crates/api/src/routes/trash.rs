//! Trash: soft-deleted records, restore and permanent delete.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use store::assets::{self, Asset};
use store::employees::{self, Employee};

use crate::response::ApiError;
use crate::state::AppState;

/// GET /trash/assets
pub async fn list_assets(State(state): State<AppState>) -> Result<Json<Vec<Asset>>, ApiError> {
    Ok(Json(assets::list_trashed(&state.db).await?))
}

/// POST /trash/assets/:id/restore
pub async fn restore_asset(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    assets::restore(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /trash/assets/:id - Permanent delete.
pub async fn purge_asset(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    assets::purge(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /trash/employees
pub async fn list_employees(
    State(state): State<AppState>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    Ok(Json(employees::list_trashed(&state.db).await?))
}

/// POST /trash/employees/:id/restore
pub async fn restore_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    employees::restore(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /trash/employees/:id - Permanent delete.
pub async fn purge_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    employees::purge(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
