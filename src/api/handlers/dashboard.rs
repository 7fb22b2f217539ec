use axum::extract::{Query, State};
use axum::Json;

use crate::errors::AppError;
use crate::services::{Dashboard, StatisticsReport};
use crate::AppState;

use super::{ok, ApiResponse, ScopeQuery};

/// GET /api/dashboard?scope=: summary, cumulative series, best sport, form strip
pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<ScopeQuery>,
) -> Result<Json<ApiResponse<Dashboard>>, AppError> {
    Ok(ok(state.ledger.dashboard(&query.scope()).await?))
}

/// GET /api/statistics?scope=: per-sport, per-month and per-status breakdowns
pub async fn statistics(
    State(state): State<AppState>,
    Query(query): Query<ScopeQuery>,
) -> Result<Json<ApiResponse<StatisticsReport>>, AppError> {
    Ok(ok(state.ledger.statistics(&query.scope()).await?))
}
