use std::sync::Arc;

use betledger::api::router::create_router;
use betledger::config::AppConfig;
use betledger::services::LedgerService;
use betledger::store::{LedgerStore, MemoryStore, PgStore};
use betledger::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    init_tracing(config.log_json);

    let addr = format!("{}:{}", config.host, config.port);

    let store: Arc<dyn LedgerStore> = match &config.database_url {
        Some(url) => {
            tracing::info!("Connecting to database...");
            let store = PgStore::connect(url).await?;
            tracing::info!("Database connected, migrations applied");
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; ledger is kept in memory and lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    if !config.has_api_auth() {
        tracing::warn!("API_TOKEN not set; ledger API is unauthenticated");
    }

    // No narrative provider is wired in; /api/insights answers 503 until one is.
    let ledger = LedgerService::new(store, config.ledger_settings());

    let state = AppState {
        ledger,
        config,
        metrics_handle: betledger::metrics::init_metrics(),
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing(json: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
