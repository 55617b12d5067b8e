//! Asset loans.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use store::loans::{self, Loan, NewLoan};

use crate::response::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoanPayload {
    pub asset_id: i64,
    pub employee_id: i64,
    pub due_at: DateTime<Utc>,
}

/// GET /loans
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Loan>>, ApiError> {
    Ok(Json(loans::list(&state.db).await?))
}

/// POST /loans
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<LoanPayload>,
) -> Result<(StatusCode, Json<Loan>), ApiError> {
    let loan = loans::create(
        &state.db,
        &NewLoan {
            asset_id: payload.asset_id,
            employee_id: payload.employee_id,
            due_at: payload.due_at,
        },
        Utc::now(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(loan)))
}

/// POST /loans/:id/return - Close out an ongoing or overdue loan.
pub async fn mark_returned(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Loan>, ApiError> {
    Ok(Json(loans::mark_returned(&state.db, id, Utc::now()).await?))
}
