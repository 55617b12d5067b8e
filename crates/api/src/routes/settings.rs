//! The settings singleton.

use axum::extract::State;
use axum::Json;
use desk_core::{AppSettings, BackupFrequency};
use serde::Deserialize;
use store::settings;
use validator::Validate;

use crate::response::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct SettingsPayload {
    pub backup_frequency: String,
    #[validate(range(max = 23, message = "hour out of range"))]
    pub backup_hour: u32,
    #[validate(range(max = 59, message = "minute out of range"))]
    pub backup_minute: u32,
    #[validate(range(max = 6, message = "weekday out of range"))]
    pub backup_weekday: u32,
    #[validate(range(min = 1, max = 28, message = "day of month out of range"))]
    pub backup_day_of_month: u32,
}

/// GET /settings
pub async fn get_settings(State(state): State<AppState>) -> Result<Json<AppSettings>, ApiError> {
    Ok(Json(settings::load(&state.db).await?))
}

/// PUT /settings - Overwrite the singleton.
///
/// The scheduler snapshots settings at startup; a changed backup cadence
/// takes effect on the next restart.
pub async fn put_settings(
    State(state): State<AppState>,
    Json(payload): Json<SettingsPayload>,
) -> Result<Json<AppSettings>, ApiError> {
    payload.validate()?;

    let frequency = BackupFrequency::parse(&payload.backup_frequency).ok_or_else(|| {
        ApiError::bad_request(format!(
            "unknown backup frequency: {}",
            payload.backup_frequency
        ))
    })?;

    let updated = AppSettings {
        backup_frequency: frequency,
        backup_hour: payload.backup_hour,
        backup_minute: payload.backup_minute,
        backup_weekday: payload.backup_weekday,
        backup_day_of_month: payload.backup_day_of_month,
    };

    settings::save(&state.db, &updated).await?;
    Ok(Json(updated))
}
