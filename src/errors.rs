use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Domain errors raised by the ledger service and its validation.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("unknown bet status: {0}")]
    UnknownStatus(String),

    #[error("invalid wager: {0}")]
    InvalidWager(String),

    #[error("invalid bankroll: {0}")]
    InvalidBankroll(String),

    #[error("wager not found: {0}")]
    WagerNotFound(String),

    #[error("bankroll not found: {0}")]
    BankrollNotFound(String),

    #[error("invalid backup: {0}")]
    InvalidBackup(String),

    #[error("at least {required} wagers are needed for an insight, scope has {actual}")]
    InsufficientHistory { required: usize, actual: usize },

    #[error("no insight provider configured")]
    InsightUnavailable,

    #[error("insight provider failed: {0}")]
    InsightFailed(String),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Bad gateway: {0}")]
    BadGateway(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".into()),
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            AppError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".into())
            }
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                error: message,
            }),
        )
            .into_response()
    }
}

/// Malformed or ill-typed request bodies (an unknown status, a bad date) are client errors.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<LedgerError> for AppError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::WagerNotFound(_) | LedgerError::BankrollNotFound(_) => {
                AppError::NotFound(e.to_string())
            }
            LedgerError::UnknownStatus(_)
            | LedgerError::InvalidWager(_)
            | LedgerError::InvalidBankroll(_)
            | LedgerError::InvalidBackup(_)
            | LedgerError::InsufficientHistory { .. } => AppError::BadRequest(e.to_string()),
            LedgerError::InsightUnavailable => AppError::Unavailable(e.to_string()),
            LedgerError::InsightFailed(_) => AppError::BadGateway(e.to_string()),
            LedgerError::Store(inner) => AppError::Internal(inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_error_status_mapping() {
        let resp = AppError::from(LedgerError::WagerNotFound("x".into())).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = AppError::from(LedgerError::UnknownStatus("VOID".into())).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = AppError::from(LedgerError::InsightUnavailable).into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let resp = AppError::from(LedgerError::InsightFailed("quota".into())).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let resp = AppError::from(LedgerError::Store(anyhow::anyhow!("disk gone"))).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
