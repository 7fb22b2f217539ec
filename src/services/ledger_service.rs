use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::errors::LedgerError;
use crate::ledger::breakdown::{self, FormMark, MonthlyProfit, SportSlice, StatusDistribution};
use crate::ledger::filter::{self, QuickStats, WagerFilter};
use crate::ledger::{self, CategoryProfit, SeriesPoint, SummaryStatistics};
use crate::metrics;
use crate::models::{check_amounts, Bankroll, BetStatus, NewBankroll, NewWager, Scope, StatusChange, Wager};
use crate::services::insight::{Insight, InsightProvider, WagerSummary};
use crate::store::{Collection, LedgerStore};

const RECENT_FORM_LEN: usize = 5;
const PENDING_PREVIEW_LEN: usize = 3;

/// Knobs the service reads from `AppConfig`.
#[derive(Debug, Clone)]
pub struct LedgerSettings {
    pub default_bankroll_capital: Decimal,
    pub insight_min_wagers: usize,
    pub insight_max_wagers: usize,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            default_bankroll_capital: Decimal::from(1_000),
            insight_min_wagers: 3,
            insight_max_wagers: 50,
        }
    }
}

// ---------------------------------------------------------------------------
// Read models
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WagerList {
    pub wagers: Vec<Wager>,
    pub quick_stats: QuickStats,
    pub bookmakers: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub scope: Scope,
    pub statistics: SummaryStatistics,
    pub series: Vec<SeriesPoint>,
    pub best_category: Option<CategoryProfit>,
    pub recent_form: Vec<FormMark>,
    pub pending_preview: Vec<Wager>,
    pub bankroll_growth_pct: Decimal,
    pub stake_discipline_pct: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsReport {
    pub scope: Scope,
    pub statistics: SummaryStatistics,
    pub sports: Vec<SportSlice>,
    pub monthly: Vec<MonthlyProfit>,
    pub statuses: StatusDistribution,
}

/// Full export of both collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub bankrolls: Vec<Bankroll>,
    pub wagers: Vec<Wager>,
    pub export_date: DateTime<Utc>,
}

/// Import document. Legacy exports name the wager array `bets`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupImport {
    pub bankrolls: Option<Vec<Bankroll>>,
    #[serde(alias = "bets")]
    pub wagers: Option<Vec<Wager>>,
    pub export_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub bankrolls: usize,
    pub wagers: usize,
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Orchestrates load, apply and save against the injected store.
///
/// Writers are serialized by `write_lock` so that two concurrent requests
/// cannot both read the same snapshot and lose one update.
#[derive(Clone)]
pub struct LedgerService {
    store: Arc<dyn LedgerStore>,
    insights: Option<Arc<dyn InsightProvider>>,
    settings: LedgerSettings,
    write_lock: Arc<Mutex<()>>,
}

impl LedgerService {
    pub fn new(store: Arc<dyn LedgerStore>, settings: LedgerSettings) -> Self {
        Self {
            store,
            insights: None,
            settings,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn with_insight_provider(mut self, provider: Arc<dyn InsightProvider>) -> Self {
        self.insights = Some(provider);
        self
    }

    pub async fn ping(&self) -> anyhow::Result<()> {
        self.store.ping().await
    }

    // -- snapshot helpers ---------------------------------------------------

    async fn load_collection<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Option<Vec<T>>, LedgerError> {
        let Some(raw) = self.store.load(collection).await? else {
            return Ok(None);
        };
        let items = serde_json::from_value(raw).map_err(|e| {
            anyhow::anyhow!("stored {} collection is corrupt: {e}", collection.key())
        })?;
        Ok(Some(items))
    }

    async fn save_collection<T: Serialize>(
        &self,
        collection: Collection,
        items: &[T],
    ) -> Result<(), LedgerError> {
        let value = serde_json::to_value(items).map_err(anyhow::Error::from)?;
        self.store.save(collection, value).await?;
        Ok(())
    }

    async fn load_bankrolls(&self) -> Result<Vec<Bankroll>, LedgerError> {
        Ok(self
            .load_collection(Collection::Bankrolls)
            .await?
            .unwrap_or_else(|| vec![Bankroll::seed(self.settings.default_bankroll_capital)]))
    }

    async fn load_wagers(&self) -> Result<Vec<Wager>, LedgerError> {
        Ok(self.load_collection(Collection::Wagers).await?.unwrap_or_default())
    }

    async fn save_bankrolls(&self, bankrolls: &[Bankroll]) -> Result<(), LedgerError> {
        self.save_collection(Collection::Bankrolls, bankrolls).await?;
        metrics::record_bankroll_count(bankrolls.len());
        Ok(())
    }

    async fn save_wagers(&self, wagers: &[Wager]) -> Result<(), LedgerError> {
        self.save_collection(Collection::Wagers, wagers).await?;
        metrics::record_wager_counts(wagers);
        Ok(())
    }

    // -- bankrolls ----------------------------------------------------------

    pub async fn bankrolls(&self) -> Result<Vec<Bankroll>, LedgerError> {
        self.load_bankrolls().await
    }

    pub async fn create_bankroll(&self, new: NewBankroll) -> Result<Bankroll, LedgerError> {
        let bankroll = new.into_bankroll()?;

        let _guard = self.write_lock.lock().await;
        let mut bankrolls = self.load_bankrolls().await?;
        bankrolls.push(bankroll.clone());
        self.save_bankrolls(&bankrolls).await?;

        metrics::bankroll_created();
        tracing::info!(
            bankroll_id = %bankroll.id,
            name = %bankroll.name,
            initial_capital = %bankroll.initial_capital,
            "Bankroll created"
        );
        Ok(bankroll)
    }

    pub async fn update_bankroll(&self, id: &str, new: NewBankroll) -> Result<Bankroll, LedgerError> {
        let updated = new.into_bankroll_with_id(id.to_string())?;

        let _guard = self.write_lock.lock().await;
        let mut bankrolls = self.load_bankrolls().await?;
        let slot = bankrolls
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| LedgerError::BankrollNotFound(id.to_string()))?;
        *slot = updated.clone();
        self.save_bankrolls(&bankrolls).await?;

        tracing::info!(bankroll_id = %id, "Bankroll updated");
        Ok(updated)
    }

    /// Remove a bankroll. Its wagers stay in the ledger and remain visible under `all`.
    pub async fn delete_bankroll(&self, id: &str) -> Result<(), LedgerError> {
        let _guard = self.write_lock.lock().await;
        let mut bankrolls = self.load_bankrolls().await?;
        let before = bankrolls.len();
        bankrolls.retain(|b| b.id != id);
        if bankrolls.len() == before {
            return Err(LedgerError::BankrollNotFound(id.to_string()));
        }
        self.save_bankrolls(&bankrolls).await?;

        tracing::info!(bankroll_id = %id, "Bankroll deleted");
        Ok(())
    }

    // -- wagers -------------------------------------------------------------

    /// Wagers visible under `scope`. Orphans of a deleted bankroll only show under `all`.
    async fn scoped_wagers(&self, bankrolls: &[Bankroll], scope: &Scope) -> Result<Vec<Wager>, LedgerError> {
        if let Scope::Bankroll(id) = scope {
            if !bankrolls.iter().any(|b| &b.id == id) {
                return Ok(Vec::new());
            }
        }
        Ok(ledger::scope(&self.load_wagers().await?, scope))
    }

    pub async fn wagers(&self, scope: &Scope, filter: &WagerFilter) -> Result<WagerList, LedgerError> {
        let bankrolls = self.load_bankrolls().await?;
        let scoped = self.scoped_wagers(&bankrolls, scope).await?;
        let wagers = filter.apply(&scoped);

        Ok(WagerList {
            quick_stats: filter::quick_stats(&wagers),
            bookmakers: filter::bookmakers(&scoped),
            wagers,
        })
    }

    async fn ensure_bankroll_exists(&self, id: &str) -> Result<(), LedgerError> {
        let bankrolls = self.load_bankrolls().await?;
        if bankrolls.iter().any(|b| b.id == id) {
            Ok(())
        } else {
            Err(LedgerError::InvalidWager(format!("unknown bankroll: {id}")))
        }
    }

    /// Record a new wager. Newest wagers sit at the front of the ledger.
    pub async fn record_wager(&self, new: NewWager) -> Result<Wager, LedgerError> {
        let _guard = self.write_lock.lock().await;
        self.ensure_bankroll_exists(&new.bankroll_id).await?;
        let wager = new.into_wager()?;

        let mut wagers = self.load_wagers().await?;
        wagers.insert(0, wager.clone());
        self.save_wagers(&wagers).await?;

        metrics::wager_recorded();
        tracing::info!(
            wager_id = %wager.id,
            bankroll_id = %wager.bankroll_id,
            status = %wager.status,
            stake = %wager.stake,
            odds = %wager.odds,
            "Wager recorded"
        );
        Ok(wager)
    }

    /// Replace every editable field of a wager; profit is re-derived.
    pub async fn edit_wager(&self, id: &str, new: NewWager) -> Result<Wager, LedgerError> {
        let _guard = self.write_lock.lock().await;
        self.ensure_bankroll_exists(&new.bankroll_id).await?;

        let mut wagers = self.load_wagers().await?;
        let slot = wagers
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| LedgerError::WagerNotFound(id.to_string()))?;
        let updated = new.into_wager_with_id(id.to_string())?;
        *slot = updated.clone();
        self.save_wagers(&wagers).await?;

        tracing::info!(wager_id = %id, profit = %updated.profit, "Wager edited");
        Ok(updated)
    }

    pub async fn update_status(&self, id: &str, change: StatusChange) -> Result<Wager, LedgerError> {
        let _guard = self.write_lock.lock().await;
        let mut wagers = self.load_wagers().await?;
        let wager = wagers
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| LedgerError::WagerNotFound(id.to_string()))?;

        let manual = change.manual_amount.filter(|_| change.status == BetStatus::CashOut);
        check_amounts(wager.odds, wager.stake, manual)?;

        let previous = wager.status;
        wager.apply_status(change.status, change.manual_amount);
        let updated = wager.clone();
        self.save_wagers(&wagers).await?;

        metrics::wager_status_changed(updated.status);
        tracing::info!(
            wager_id = %id,
            from = %previous,
            to = %updated.status,
            profit = %updated.profit,
            "Wager status changed"
        );
        Ok(updated)
    }

    pub async fn delete_wager(&self, id: &str) -> Result<(), LedgerError> {
        let _guard = self.write_lock.lock().await;
        let mut wagers = self.load_wagers().await?;
        let before = wagers.len();
        wagers.retain(|w| w.id != id);
        if wagers.len() == before {
            return Err(LedgerError::WagerNotFound(id.to_string()));
        }
        self.save_wagers(&wagers).await?;

        metrics::wager_deleted();
        tracing::info!(wager_id = %id, "Wager deleted");
        Ok(())
    }

    // -- analytics ----------------------------------------------------------

    async fn scoped_snapshot(&self, scope: &Scope) -> Result<(Vec<Wager>, SummaryStatistics), LedgerError> {
        let bankrolls = self.load_bankrolls().await?;
        let wagers = self.scoped_wagers(&bankrolls, scope).await?;
        let stats = ledger::aggregate(&wagers, ledger::initial_capital_for(&bankrolls, scope));
        Ok((wagers, stats))
    }

    pub async fn summary(&self, scope: &Scope) -> Result<SummaryStatistics, LedgerError> {
        Ok(self.scoped_snapshot(scope).await?.1)
    }

    pub async fn dashboard(&self, scope: &Scope) -> Result<Dashboard, LedgerError> {
        let (wagers, statistics) = self.scoped_snapshot(scope).await?;

        Ok(Dashboard {
            scope: scope.clone(),
            series: ledger::build_cumulative_series(&wagers),
            best_category: ledger::best_category(&wagers),
            recent_form: breakdown::recent_form(&wagers, RECENT_FORM_LEN),
            pending_preview: breakdown::pending_preview(&wagers, PENDING_PREVIEW_LEN),
            bankroll_growth_pct: breakdown::bankroll_growth_pct(&statistics),
            stake_discipline_pct: breakdown::stake_discipline(&wagers, statistics.current_bankroll),
            statistics,
        })
    }

    pub async fn statistics(&self, scope: &Scope) -> Result<StatisticsReport, LedgerError> {
        let (wagers, statistics) = self.scoped_snapshot(scope).await?;

        Ok(StatisticsReport {
            scope: scope.clone(),
            statistics,
            sports: breakdown::sport_breakdown(&wagers),
            monthly: breakdown::monthly_profit(&wagers),
            statuses: breakdown::status_distribution(&wagers),
        })
    }

    // -- backup -------------------------------------------------------------

    pub async fn export(&self) -> Result<Backup, LedgerError> {
        Ok(Backup {
            bankrolls: self.load_bankrolls().await?,
            wagers: self.load_wagers().await?,
            export_date: Utc::now(),
        })
    }

    /// Replace both collections with a backup after validating every record.
    pub async fn import(&self, backup: BackupImport) -> Result<ImportSummary, LedgerError> {
        let (Some(bankrolls), Some(mut wagers)) = (backup.bankrolls, backup.wagers) else {
            return Err(LedgerError::InvalidBackup(
                "document must contain both bankrolls and wagers".into(),
            ));
        };

        let mut seen = HashSet::new();
        for bankroll in &bankrolls {
            bankroll.validate()?;
            if !seen.insert(bankroll.id.as_str()) {
                return Err(LedgerError::InvalidBackup(format!(
                    "duplicate bankroll id: {}",
                    bankroll.id
                )));
            }
        }

        let mut seen = HashSet::new();
        for wager in &mut wagers {
            wager
                .validate()
                .map_err(|e| LedgerError::InvalidBackup(format!("wager {}: {e}", wager.id)))?;
            if !seen.insert(wager.id.clone()) {
                return Err(LedgerError::InvalidBackup(format!("duplicate wager id: {}", wager.id)));
            }
            wager.recompute_profit();
        }

        let _guard = self.write_lock.lock().await;
        self.save_bankrolls(&bankrolls).await?;
        self.save_wagers(&wagers).await?;

        metrics::backup_imported();
        tracing::warn!(
            bankrolls = bankrolls.len(),
            wagers = wagers.len(),
            exported_at = ?backup.export_date,
            "Ledger replaced from backup"
        );
        Ok(ImportSummary {
            bankrolls: bankrolls.len(),
            wagers: wagers.len(),
        })
    }

    // -- insight ------------------------------------------------------------

    pub async fn insight(&self, scope: &Scope) -> Result<Insight, LedgerError> {
        let bankrolls = self.load_bankrolls().await?;
        let wagers = self.scoped_wagers(&bankrolls, scope).await?;
        if wagers.len() < self.settings.insight_min_wagers {
            return Err(LedgerError::InsufficientHistory {
                required: self.settings.insight_min_wagers,
                actual: wagers.len(),
            });
        }
        let provider = self.insights.as_ref().ok_or(LedgerError::InsightUnavailable)?;

        let summaries: Vec<WagerSummary> = wagers
            .iter()
            .take(self.settings.insight_max_wagers)
            .map(WagerSummary::from)
            .collect();

        metrics::insight_requested();
        tracing::info!(scope = %scope, wagers = summaries.len(), "Requesting insight");
        provider
            .generate_insight(&summaries)
            .await
            .map_err(|e| LedgerError::InsightFailed(format!("{e:#}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sport;
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use chrono::NaiveDate;

    fn service() -> LedgerService {
        LedgerService::new(Arc::new(MemoryStore::new()), LedgerSettings::default())
    }

    fn new_wager(bankroll_id: &str, stake: i64, odds_tenths: i64, status: BetStatus) -> NewWager {
        NewWager {
            bankroll_id: bankroll_id.into(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            bookmaker: "Winamax".into(),
            sport: Sport::Tennis,
            odds: Decimal::new(odds_tenths, 1),
            stake: Decimal::from(stake),
            status,
            description: String::new(),
            manual_amount: None,
        }
    }

    struct EchoInsights;

    #[async_trait]
    impl InsightProvider for EchoInsights {
        async fn generate_insight(&self, summaries: &[WagerSummary]) -> anyhow::Result<Insight> {
            Ok(Insight {
                text: format!("{} wagers reviewed", summaries.len()),
                sources: vec![],
            })
        }
    }

    #[tokio::test]
    async fn test_default_bankroll_seeded() {
        let svc = service();
        let bankrolls = svc.bankrolls().await.unwrap();
        assert_eq!(bankrolls.len(), 1);
        assert_eq!(bankrolls[0].id, "default");
        assert_eq!(bankrolls[0].initial_capital, Decimal::from(1_000));
    }

    #[tokio::test]
    async fn test_record_prepends_and_status_recomputes() {
        let svc = service();
        let first = svc.record_wager(new_wager("default", 10, 20, BetStatus::Pending)).await.unwrap();
        let second = svc.record_wager(new_wager("default", 5, 30, BetStatus::Pending)).await.unwrap();

        let list = svc.wagers(&Scope::All, &WagerFilter::default()).await.unwrap();
        assert_eq!(list.wagers[0].id, second.id);
        assert_eq!(list.wagers[1].id, first.id);

        let won = svc
            .update_status(&first.id, StatusChange { status: BetStatus::Won, manual_amount: None })
            .await
            .unwrap();
        assert_eq!(won.profit, Decimal::from(10));

        let stats = svc.summary(&Scope::All).await.unwrap();
        assert_eq!(stats.total_profit, Decimal::from(10));
        assert_eq!(stats.active_bets, 1);
        assert_eq!(stats.current_bankroll, Decimal::from(1_010));
    }

    #[tokio::test]
    async fn test_record_rejects_unknown_bankroll() {
        let svc = service();
        let err = svc
            .record_wager(new_wager("nope", 10, 20, BetStatus::Pending))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidWager(_)));
    }

    #[tokio::test]
    async fn test_edit_keeps_id_and_recomputes_profit() {
        let svc = service();
        let wager = svc.record_wager(new_wager("default", 10, 20, BetStatus::Won)).await.unwrap();
        let edited = svc
            .edit_wager(&wager.id, new_wager("default", 40, 20, BetStatus::Lost))
            .await
            .unwrap();
        assert_eq!(edited.id, wager.id);
        assert_eq!(edited.profit, Decimal::from(-40));
    }

    #[tokio::test]
    async fn test_unknown_wager_not_found() {
        let svc = service();
        let err = svc.delete_wager("missing").await.unwrap_err();
        assert!(matches!(err, LedgerError::WagerNotFound(_)));
    }

    #[tokio::test]
    async fn test_deleting_bankroll_orphans_wagers() {
        let svc = service();
        let side = svc
            .create_bankroll(NewBankroll {
                name: "Side pot".into(),
                initial_capital: Decimal::from(200),
                color: None,
            })
            .await
            .unwrap();
        svc.record_wager(new_wager(&side.id, 10, 20, BetStatus::Lost)).await.unwrap();
        svc.delete_bankroll(&side.id).await.unwrap();

        let scoped = svc.summary(&Scope::Bankroll(side.id.clone())).await.unwrap();
        assert_eq!(scoped.total_bets, 0);
        assert_eq!(scoped.initial_bankroll, Decimal::ZERO);

        let global = svc.summary(&Scope::All).await.unwrap();
        assert_eq!(global.total_bets, 1);
        assert_eq!(global.initial_bankroll, Decimal::from(1_000));
    }

    #[tokio::test]
    async fn test_import_requires_both_collections() {
        let svc = service();
        let err = svc
            .import(BackupImport {
                bankrolls: Some(vec![]),
                wagers: None,
                export_date: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidBackup(_)));
    }

    #[tokio::test]
    async fn test_export_import_roundtrip_recomputes_profit() {
        let svc = service();
        svc.record_wager(new_wager("default", 10, 20, BetStatus::Won)).await.unwrap();
        let mut backup = svc.export().await.unwrap();
        backup.wagers[0].profit = Decimal::from(999);

        let other = service();
        let summary = other
            .import(BackupImport {
                bankrolls: Some(backup.bankrolls),
                wagers: Some(backup.wagers),
                export_date: Some(backup.export_date),
            })
            .await
            .unwrap();
        assert_eq!(summary.wagers, 1);
        let stats = other.summary(&Scope::All).await.unwrap();
        assert_eq!(stats.total_profit, Decimal::from(10));
    }

    #[tokio::test]
    async fn test_insight_requires_history_and_provider() {
        let svc = service();
        svc.record_wager(new_wager("default", 10, 20, BetStatus::Won)).await.unwrap();
        let err = svc.insight(&Scope::All).await.unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientHistory { required: 3, actual: 1 }));

        for _ in 0..2 {
            svc.record_wager(new_wager("default", 10, 20, BetStatus::Lost)).await.unwrap();
        }
        let err = svc.insight(&Scope::All).await.unwrap_err();
        assert!(matches!(err, LedgerError::InsightUnavailable));

        let svc = svc.with_insight_provider(Arc::new(EchoInsights));
        let insight = svc.insight(&Scope::All).await.unwrap();
        assert_eq!(insight.text, "3 wagers reviewed");
    }
}
