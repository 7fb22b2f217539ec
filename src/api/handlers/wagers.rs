use axum::extract::{Path, Query, State};
use axum::extract::rejection::JsonRejection;
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::ledger::filter::WagerFilter;
use crate::models::{BetStatus, NewWager, Scope, StatusChange, Wager};
use crate::services::ledger_service::WagerList;
use crate::AppState;

use super::{ok, ApiResponse};

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// List filters. `ALL` (any case) is accepted as "no filter" for status and bookmaker.
#[derive(Debug, Default, Deserialize)]
pub struct WagerQuery {
    pub scope: Option<String>,
    pub status: Option<String>,
    pub bookmaker: Option<String>,
    pub search: Option<String>,
}

fn unless_all(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty() && !v.eq_ignore_ascii_case("all"))
}

impl WagerQuery {
    fn into_parts(self) -> Result<(Scope, WagerFilter), AppError> {
        let scope = self.scope.as_deref().map(Scope::parse).unwrap_or_default();
        let status = unless_all(self.status)
            .map(|s| s.parse::<BetStatus>())
            .transpose()?;

        Ok((
            scope,
            WagerFilter {
                status,
                bookmaker: unless_all(self.bookmaker),
                search: self.search,
            },
        ))
    }
}

/// Status is taken as a string so an unknown value is a 400, not a body rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangeRequest {
    pub status: String,
    pub manual_amount: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/wagers?scope=&status=&bookmaker=&search=
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<WagerQuery>,
) -> Result<Json<ApiResponse<WagerList>>, AppError> {
    let (scope, filter) = query.into_parts()?;
    Ok(ok(state.ledger.wagers(&scope, &filter).await?))
}

/// POST /api/wagers
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewWager>, JsonRejection>,
) -> Result<Json<ApiResponse<Wager>>, AppError> {
    let Json(body) = payload?;
    Ok(ok(state.ledger.record_wager(body).await?))
}

/// PUT /api/wagers/:id: full edit, profit re-derived
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<NewWager>, JsonRejection>,
) -> Result<Json<ApiResponse<Wager>>, AppError> {
    let Json(body) = payload?;
    Ok(ok(state.ledger.edit_wager(&id, body).await?))
}

/// POST /api/wagers/:id/status
pub async fn change_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<StatusChangeRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Wager>>, AppError> {
    let Json(body) = payload?;
    let change = StatusChange {
        status: body.status.parse()?,
        manual_amount: body.manual_amount,
    };
    Ok(ok(state.ledger.update_status(&id, change).await?))
}

/// DELETE /api/wagers/:id
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    state.ledger.delete_wager(&id).await?;
    Ok(ok(json!({ "deleted": id })))
}
