pub mod insight;
pub mod ledger_service;

pub use insight::{Insight, InsightProvider, InsightSource, WagerSummary};
pub use ledger_service::{Backup, BackupImport, Dashboard, LedgerService, LedgerSettings, StatisticsReport};
