//! Secondary dashboard and statistics-page figures.

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{percentage, SummaryStatistics};
use crate::models::{BetStatus, Sport, Wager};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SportSlice {
    pub name: Sport,
    pub count: usize,
    pub profit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyProfit {
    /// `YYYY-MM`
    pub month: String,
    pub profit: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusDistribution {
    pub won: usize,
    pub lost: usize,
    pub other: usize,
}

/// One-letter outcome marker for the recent-form strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormMark {
    W,
    L,
    R,
    C,
    V,
}

// ---------------------------------------------------------------------------
// Per-sport / per-month
// ---------------------------------------------------------------------------

/// Every wager in scope grouped by sport, most profitable first.
pub fn sport_breakdown(wagers: &[Wager]) -> Vec<SportSlice> {
    let mut slices: Vec<SportSlice> = Vec::new();
    for wager in wagers {
        match slices.iter_mut().find(|s| s.name == wager.sport) {
            Some(slice) => {
                slice.count += 1;
                slice.profit += wager.profit;
            }
            None => slices.push(SportSlice {
                name: wager.sport,
                count: 1,
                profit: wager.profit,
            }),
        }
    }
    slices.sort_by(|a, b| b.profit.cmp(&a.profit));
    slices
}

/// Settled profit bucketed by calendar month, oldest month first.
pub fn monthly_profit(wagers: &[Wager]) -> Vec<MonthlyProfit> {
    let mut buckets: Vec<((i32, u32), Decimal)> = Vec::new();
    for wager in wagers.iter().filter(|w| w.is_settled()) {
        let key = (wager.date.year(), wager.date.month());
        match buckets.iter_mut().find(|(k, _)| *k == key) {
            Some((_, profit)) => *profit += wager.profit,
            None => buckets.push((key, wager.profit)),
        }
    }
    buckets.sort_by_key(|(key, _)| *key);
    buckets
        .into_iter()
        .map(|((year, month), profit)| MonthlyProfit {
            month: format!("{year:04}-{month:02}"),
            profit,
        })
        .collect()
}

pub fn status_distribution(wagers: &[Wager]) -> StatusDistribution {
    wagers.iter().fold(StatusDistribution::default(), |mut acc, w| {
        match w.status {
            BetStatus::Won => acc.won += 1,
            BetStatus::Lost => acc.lost += 1,
            BetStatus::Pending => {}
            BetStatus::Cancelled | BetStatus::Refunded | BetStatus::CashOut => acc.other += 1,
        }
        acc
    })
}

// ---------------------------------------------------------------------------
// Dashboard strips
// ---------------------------------------------------------------------------

fn form_mark(wager: &Wager) -> FormMark {
    match wager.status {
        BetStatus::Won => FormMark::W,
        BetStatus::Lost => FormMark::L,
        BetStatus::Refunded => FormMark::R,
        BetStatus::CashOut => FormMark::C,
        BetStatus::Cancelled | BetStatus::Pending => {
            if wager.profit > Decimal::ZERO {
                FormMark::W
            } else if wager.profit < Decimal::ZERO {
                FormMark::L
            } else {
                FormMark::V
            }
        }
    }
}

/// Marks for the first `n` settled wagers in list order (newest first).
pub fn recent_form(wagers: &[Wager], n: usize) -> Vec<FormMark> {
    wagers
        .iter()
        .filter(|w| w.is_settled())
        .take(n)
        .map(form_mark)
        .collect()
}

pub fn pending_preview(wagers: &[Wager], n: usize) -> Vec<Wager> {
    wagers
        .iter()
        .filter(|w| !w.is_settled())
        .take(n)
        .cloned()
        .collect()
}

/// Average stake across the scope as a percentage of the current bankroll.
pub fn stake_discipline(wagers: &[Wager], current_bankroll: Decimal) -> Decimal {
    if wagers.is_empty() {
        return Decimal::ZERO;
    }
    let avg_stake =
        wagers.iter().map(|w| w.stake).sum::<Decimal>() / Decimal::from(wagers.len() as i64);
    percentage(avg_stake, current_bankroll)
}

pub fn bankroll_growth_pct(stats: &SummaryStatistics) -> Decimal {
    percentage(stats.total_profit, stats.initial_bankroll)
}
