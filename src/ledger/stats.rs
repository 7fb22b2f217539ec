use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::percentage;
use crate::models::{BetStatus, Wager};

/// Summary metrics for one scope. Recomputed on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStatistics {
    pub total_profit: Decimal,
    pub roi: Decimal,
    /// Same formula as `roi`; both are kept for consumers that read either.
    #[serde(rename = "yield")]
    pub yield_pct: Decimal,
    pub win_rate: Decimal,
    pub total_bets: usize,
    pub active_bets: usize,
    pub initial_bankroll: Decimal,
    pub current_bankroll: Decimal,
}

/// A settled wager counts as won when it is `WON`, or a cash-out that locked in a gain.
pub fn is_win(wager: &Wager) -> bool {
    match wager.status {
        BetStatus::Won => true,
        BetStatus::CashOut => wager.profit > Decimal::ZERO,
        BetStatus::Pending | BetStatus::Lost | BetStatus::Cancelled | BetStatus::Refunded => false,
    }
}

/// Reduce a scoped wager list into summary statistics.
///
/// Only settled wagers feed profit, stake, ROI and win rate; pending ones
/// still count toward `total_bets` and `active_bets`.
pub fn aggregate(wagers: &[Wager], initial_capital: Decimal) -> SummaryStatistics {
    let closed: Vec<&Wager> = wagers.iter().filter(|w| w.is_settled()).collect();

    let total_profit: Decimal = closed.iter().map(|w| w.profit).sum();
    let total_stake: Decimal = closed.iter().map(|w| w.stake).sum();
    let won = closed.iter().filter(|w| is_win(w)).count();

    let roi = percentage(total_profit, total_stake);
    let win_rate = percentage(Decimal::from(won), Decimal::from(closed.len()));

    SummaryStatistics {
        total_profit,
        roi,
        yield_pct: roi,
        win_rate,
        total_bets: wagers.len(),
        active_bets: wagers.len() - closed.len(),
        initial_bankroll: initial_capital,
        current_bankroll: initial_capital + total_profit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::fixtures::{cash_out, wager};
    use crate::ledger::round_money;

    #[test]
    fn test_aggregate_empty() {
        let stats = aggregate(&[], Decimal::from(500));
        assert_eq!(stats.total_profit, Decimal::ZERO);
        assert_eq!(stats.roi, Decimal::ZERO);
        assert_eq!(stats.yield_pct, Decimal::ZERO);
        assert_eq!(stats.win_rate, Decimal::ZERO);
        assert_eq!(stats.total_bets, 0);
        assert_eq!(stats.active_bets, 0);
        assert_eq!(stats.current_bankroll, Decimal::from(500));
    }

    #[test]
    fn test_aggregate_mixed_scenario() {
        let wagers = vec![
            wager("a", 10, 20, BetStatus::Won),
            wager("a", 20, 15, BetStatus::Lost),
            wager("a", 5, 30, BetStatus::Pending),
        ];
        let stats = aggregate(&wagers, Decimal::from(1000));

        assert_eq!(stats.total_profit, Decimal::from(-10));
        assert_eq!(round_money(stats.roi), Decimal::new(-3333, 2));
        assert_eq!(stats.roi, stats.yield_pct);
        assert_eq!(stats.win_rate, Decimal::from(50));
        assert_eq!(stats.total_bets, 3);
        assert_eq!(stats.active_bets, 1);
        assert_eq!(stats.current_bankroll, Decimal::from(990));
    }

    #[test]
    fn test_only_pending_has_zero_ratios() {
        let wagers = vec![wager("a", 50, 19, BetStatus::Pending)];
        let stats = aggregate(&wagers, Decimal::ZERO);
        assert_eq!(stats.roi, Decimal::ZERO);
        assert_eq!(stats.win_rate, Decimal::ZERO);
        assert_eq!(stats.active_bets, 1);
    }

    #[test]
    fn test_profitable_cash_out_counts_as_win() {
        let wagers = vec![
            cash_out("a", 10, Decimal::from(5)),
            cash_out("a", 10, Decimal::from(-3)),
            wager("a", 10, 20, BetStatus::Refunded),
            wager("a", 10, 20, BetStatus::Lost),
        ];
        let stats = aggregate(&wagers, Decimal::ZERO);
        assert_eq!(stats.win_rate, Decimal::from(25));
        assert_eq!(stats.total_profit, Decimal::from(-8));
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let wagers = vec![
            wager("a", 13, 17, BetStatus::Won),
            wager("a", 7, 31, BetStatus::Lost),
        ];
        assert_eq!(
            aggregate(&wagers, Decimal::from(100)),
            aggregate(&wagers, Decimal::from(100))
        );
    }
}
