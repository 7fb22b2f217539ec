use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::header::CONTENT_DISPOSITION;
use axum::response::IntoResponse;
use axum::Json;

use crate::errors::AppError;
use crate::services::ledger_service::ImportSummary;
use crate::services::{Backup, BackupImport};
use crate::AppState;

use super::{ok, ApiResponse};

/// GET /api/backup: both collections as a raw download document, the same
/// shape `POST /api/backup` accepts
pub async fn export(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let backup: Backup = state.ledger.export().await?;
    let disposition = format!(
        "attachment; filename=\"betledger-backup-{}.json\"",
        backup.export_date.format("%Y-%m-%d")
    );
    Ok(([(CONTENT_DISPOSITION, disposition)], Json(backup)))
}

/// POST /api/backup: replace the whole ledger
pub async fn import(
    State(state): State<AppState>,
    payload: Result<Json<BackupImport>, JsonRejection>,
) -> Result<Json<ApiResponse<ImportSummary>>, AppError> {
    let Json(body) = payload?;
    Ok(ok(state.ledger.import(body).await?))
}
