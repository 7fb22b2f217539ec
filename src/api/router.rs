use axum::middleware;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;
use super::auth::require_auth;
use super::handlers;

pub fn create_router(state: AppState) -> Router {
    // Public routes: no authentication required
    let public = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render));

    // Ledger API: requires Bearer token when API_TOKEN is set
    let protected = Router::new()
        // Bankrolls
        .route("/api/bankrolls", get(handlers::bankrolls::list).post(handlers::bankrolls::create))
        .route(
            "/api/bankrolls/:id",
            put(handlers::bankrolls::update).delete(handlers::bankrolls::remove),
        )
        // Wagers
        .route("/api/wagers", get(handlers::wagers::list).post(handlers::wagers::create))
        .route(
            "/api/wagers/:id",
            put(handlers::wagers::update).delete(handlers::wagers::remove),
        )
        .route("/api/wagers/:id/status", post(handlers::wagers::change_status))
        // Analytics
        .route("/api/dashboard", get(handlers::dashboard::dashboard))
        .route("/api/statistics", get(handlers::dashboard::statistics))
        // Backup
        .route("/api/backup", get(handlers::backup::export).post(handlers::backup::import))
        // Narrative insight
        .route("/api/insights", post(handlers::insights::generate))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public
        .merge(protected)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
