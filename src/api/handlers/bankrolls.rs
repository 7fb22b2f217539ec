use axum::extract::{Path, State};
use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::{Bankroll, NewBankroll};
use crate::AppState;

use super::{ok, ApiResponse};

/// GET /api/bankrolls
pub async fn list(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Bankroll>>>, AppError> {
    Ok(ok(state.ledger.bankrolls().await?))
}

/// POST /api/bankrolls
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewBankroll>, JsonRejection>,
) -> Result<Json<ApiResponse<Bankroll>>, AppError> {
    let Json(body) = payload?;
    Ok(ok(state.ledger.create_bankroll(body).await?))
}

/// PUT /api/bankrolls/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<NewBankroll>, JsonRejection>,
) -> Result<Json<ApiResponse<Bankroll>>, AppError> {
    let Json(body) = payload?;
    Ok(ok(state.ledger.update_bankroll(&id, body).await?))
}

/// DELETE /api/bankrolls/:id: wagers of the bankroll are kept
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    state.ledger.delete_bankroll(&id).await?;
    Ok(ok(json!({ "deleted": id })))
}
