//! Employee CRUD, import and export.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use store::employees::{self, Employee, NewEmployee};
use transfer::ImportReport;
use validator::Validate;

use crate::response::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct EmployeePayload {
    #[validate(length(min = 1, message = "nik is required"))]
    pub nik: String,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    pub division: Option<String>,
    #[validate(email(message = "invalid email"))]
    #[serde(default)]
    pub email: Option<String>,
}

impl From<EmployeePayload> for NewEmployee {
    fn from(payload: EmployeePayload) -> Self {
        NewEmployee {
            nik: payload.nik,
            name: payload.name,
            division: payload.division,
            email: payload.email,
        }
    }
}

/// GET /employees
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Employee>>, ApiError> {
    Ok(Json(employees::list(&state.db).await?))
}

/// POST /employees
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<EmployeePayload>,
) -> Result<(StatusCode, Json<Employee>), ApiError> {
    payload.validate()?;
    let employee = employees::create(&state.db, &payload.into()).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// GET /employees/:id
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Employee>, ApiError> {
    employees::get(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("employee {id}")))
}

/// PUT /employees/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<EmployeePayload>,
) -> Result<Json<Employee>, ApiError> {
    payload.validate()?;
    Ok(Json(employees::update(&state.db, id, &payload.into()).await?))
}

/// DELETE /employees/:id - Soft delete into the trash.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    employees::soft_delete(&state.db, id, Utc::now()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /employees/import - Bulk CSV upload.
pub async fn import(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ImportReport>, ApiError> {
    Ok(Json(transfer::import_employees(&state.db, &body).await?))
}

/// GET /employees/export - CSV of live employees.
pub async fn export(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let csv = transfer::export_employees(&state.db).await?;
    Ok(([(header::CONTENT_TYPE, "text/csv")], csv))
}
