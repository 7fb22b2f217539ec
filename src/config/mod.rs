use rust_decimal::Decimal;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,

    // Storage: Postgres when set, otherwise an in-process store
    pub database_url: Option<String>,

    // Bearer token for /api routes (auth disabled when unset)
    pub api_token: Option<String>,

    // Ledger
    pub default_bankroll_capital: Decimal,
    pub insight_min_wagers: usize,
    pub insight_max_wagers: usize,

    // Logging
    pub log_json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            database_url: None,
            api_token: None,
            default_bankroll_capital: Decimal::from(1_000),
            insight_min_wagers: 3,
            insight_max_wagers: 50,
            log_json: false,
        }
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,
            database_url: non_empty("DATABASE_URL"),
            api_token: non_empty("API_TOKEN"),

            default_bankroll_capital: env::var("DEFAULT_BANKROLL_CAPITAL")
                .unwrap_or_else(|_| "1000".into())
                .parse()
                .unwrap_or(defaults.default_bankroll_capital),
            insight_min_wagers: env::var("INSIGHT_MIN_WAGERS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.insight_min_wagers),
            insight_max_wagers: env::var("INSIGHT_MAX_WAGERS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.insight_max_wagers),

            log_json: env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        })
    }

    /// Returns true if a bearer token guards the API.
    pub fn has_api_auth(&self) -> bool {
        self.api_token.is_some()
    }

    pub fn ledger_settings(&self) -> crate::services::LedgerSettings {
        crate::services::LedgerSettings {
            default_bankroll_capital: self.default_bankroll_capital,
            insight_min_wagers: self.insight_min_wagers,
            insight_max_wagers: self.insight_max_wagers,
        }
    }
}
