use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{BetStatus, Sport, Wager};

/// Compact view of a wager handed to the narrative generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WagerSummary {
    pub date: NaiveDate,
    pub sport: Sport,
    pub bookmaker: String,
    pub odds: Decimal,
    pub stake: Decimal,
    pub status: BetStatus,
    pub profit: Decimal,
    pub description: String,
}

impl From<&Wager> for WagerSummary {
    fn from(w: &Wager) -> Self {
        Self {
            date: w.date,
            sport: w.sport,
            bookmaker: w.bookmaker.clone(),
            odds: w.odds,
            stake: w.stake,
            status: w.status,
            profit: w.profit,
            description: w.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightSource {
    pub title: String,
    pub uri: String,
}

/// Narrative analysis plus the web sources it was grounded on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub text: String,
    #[serde(default)]
    pub sources: Vec<InsightSource>,
}

/// External narrative generator. The ledger only ever calls it through
/// `LedgerService::insight`.
#[async_trait]
pub trait InsightProvider: Send + Sync {
    async fn generate_insight(&self, summaries: &[WagerSummary]) -> anyhow::Result<Insight>;
}
