pub mod api;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod metrics;
pub mod models;
pub mod services;
pub mod store;

use crate::config::AppConfig;
use crate::services::LedgerService;

#[derive(Clone)]
pub struct AppState {
    pub ledger: LedgerService,
    pub config: AppConfig,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}
