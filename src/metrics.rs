use std::sync::OnceLock;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::models::{BetStatus, Wager};

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus exporter and register all ledger metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload.
///
/// Only one recorder may exist per process, so later calls reuse the first handle.
pub fn init_metrics() -> PrometheusHandle {
    HANDLE
        .get_or_init(|| {
            let handle = PrometheusBuilder::new()
                .install_recorder()
                .expect("failed to install Prometheus recorder");

            // Pre-register counters so they appear even before the first increment.
            counter!("wagers_recorded_total").absolute(0);
            counter!("wagers_deleted_total").absolute(0);
            counter!("bankrolls_created_total").absolute(0);
            counter!("backups_imported_total").absolute(0);
            counter!("insights_requested_total").absolute(0);
            for status in BetStatus::ALL {
                counter!("wager_status_changes_total", "status" => status.as_str()).absolute(0);
            }

            gauge!("ledger_wagers").set(0.0);
            gauge!("ledger_pending_wagers").set(0.0);
            gauge!("ledger_bankrolls").set(0.0);

            handle
        })
        .clone()
}

pub fn wager_recorded() {
    counter!("wagers_recorded_total").increment(1);
}

pub fn wager_deleted() {
    counter!("wagers_deleted_total").increment(1);
}

pub fn wager_status_changed(status: BetStatus) {
    counter!("wager_status_changes_total", "status" => status.as_str()).increment(1);
}

pub fn bankroll_created() {
    counter!("bankrolls_created_total").increment(1);
}

pub fn backup_imported() {
    counter!("backups_imported_total").increment(1);
}

pub fn insight_requested() {
    counter!("insights_requested_total").increment(1);
}

/// Refresh ledger-size gauges after the wager collection is saved.
pub fn record_wager_counts(wagers: &[Wager]) {
    let pending = wagers.iter().filter(|w| !w.is_settled()).count();
    gauge!("ledger_wagers").set(wagers.len() as f64);
    gauge!("ledger_pending_wagers").set(pending as f64);
}

pub fn record_bankroll_count(count: usize) {
    gauge!("ledger_bankrolls").set(count as f64);
}
