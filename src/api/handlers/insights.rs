use axum::extract::{Query, State};
use axum::Json;

use crate::errors::AppError;
use crate::services::Insight;
use crate::AppState;

use super::{ok, ApiResponse, ScopeQuery};

/// POST /api/insights?scope=
pub async fn generate(
    State(state): State<AppState>,
    Query(query): Query<ScopeQuery>,
) -> Result<Json<ApiResponse<Insight>>, AppError> {
    let scope = query.scope();
    match state.ledger.insight(&scope).await {
        Ok(insight) => Ok(ok(insight)),
        Err(e) => {
            tracing::warn!(error = %e, scope = %scope, "Insight generation failed");
            Err(e.into())
        }
    }
}
