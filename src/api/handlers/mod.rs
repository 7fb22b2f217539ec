pub mod backup;
pub mod bankrolls;
pub mod dashboard;
pub mod health;
pub mod insights;
pub mod metrics;
pub mod wagers;

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::models::Scope;

#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

pub(crate) fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        data: Some(data),
        error: None,
    })
}

/// `?scope=all` or `?scope=<bankroll id>`; absent means all.
#[derive(Debug, Default, Deserialize)]
pub struct ScopeQuery {
    pub scope: Option<String>,
}

impl ScopeQuery {
    pub fn scope(&self) -> Scope {
        self.scope.as_deref().map(Scope::parse).unwrap_or_default()
    }
}
