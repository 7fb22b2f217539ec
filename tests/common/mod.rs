use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

use betledger::api::router::create_router;
use betledger::config::AppConfig;
use betledger::services::{InsightProvider, LedgerService};
use betledger::store::MemoryStore;
use betledger::AppState;

/// Router over a fresh in-memory ledger.
#[allow(dead_code)]
pub fn build_test_app(config: AppConfig) -> axum::Router {
    build_app_with(config, None)
}

#[allow(dead_code)]
pub fn build_app_with(config: AppConfig, insights: Option<Arc<dyn InsightProvider>>) -> axum::Router {
    let mut ledger = LedgerService::new(Arc::new(MemoryStore::new()), config.ledger_settings());
    if let Some(provider) = insights {
        ledger = ledger.with_insight_provider(provider);
    }

    let state = AppState {
        ledger,
        config,
        metrics_handle: betledger::metrics::init_metrics(),
    };
    create_router(state)
}

/// Fire one request and decode the JSON body (Null when empty or not JSON).
#[allow(dead_code)]
pub async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_string(&json).unwrap())
        }
        None => Body::empty(),
    };

    let resp = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Decimals travel as JSON strings.
#[allow(dead_code)]
pub fn dec(value: &Value) -> Decimal {
    match value {
        Value::String(s) => s.parse().unwrap(),
        Value::Number(n) => n.to_string().parse().unwrap(),
        other => panic!("not a decimal: {other}"),
    }
}
