//! Asset CRUD, import and export.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use store::assets::{self, Asset, NewAsset};
use transfer::ImportReport;
use validator::Validate;

use crate::response::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct AssetPayload {
    #[validate(length(min = 1, message = "tag is required"))]
    pub tag: String,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub division: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
}

impl From<AssetPayload> for NewAsset {
    fn from(payload: AssetPayload) -> Self {
        NewAsset {
            tag: payload.tag,
            name: payload.name,
            brand: payload.brand,
            vendor: payload.vendor,
            division: payload.division,
            assigned_to: payload.assigned_to,
        }
    }
}

/// GET /assets
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Asset>>, ApiError> {
    Ok(Json(assets::list(&state.db).await?))
}

/// POST /assets
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<AssetPayload>,
) -> Result<(StatusCode, Json<Asset>), ApiError> {
    payload.validate()?;
    let asset = assets::create(&state.db, &payload.into()).await?;
    Ok((StatusCode::CREATED, Json(asset)))
}

/// GET /assets/:id
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Asset>, ApiError> {
    assets::get(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("asset {id}")))
}

/// PUT /assets/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<AssetPayload>,
) -> Result<Json<Asset>, ApiError> {
    payload.validate()?;
    Ok(Json(assets::update(&state.db, id, &payload.into()).await?))
}

/// DELETE /assets/:id - Soft delete into the trash.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    assets::soft_delete(&state.db, id, Utc::now()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /assets/import - Bulk CSV upload.
pub async fn import(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ImportReport>, ApiError> {
    Ok(Json(transfer::import_assets(&state.db, &body).await?))
}

/// GET /assets/export - CSV of live assets.
pub async fn export(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let csv = transfer::export_assets(&state.db).await?;
    Ok(([(header::CONTENT_TYPE, "text/csv")], csv))
}
