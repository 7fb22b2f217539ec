use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::round_money;
use crate::models::{Sport, Wager};

pub const ORIGIN_LABEL: &str = "Start";

/// One point of the cumulative-profit chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub label: String,
    pub cumulative_profit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryProfit {
    pub name: Sport,
    pub profit: Decimal,
}

/// Settled wagers in date order. The sort is stable, so same-day wagers keep
/// their input order.
pub(crate) fn settled_by_date(wagers: &[Wager]) -> Vec<&Wager> {
    let mut closed: Vec<&Wager> = wagers.iter().filter(|w| w.is_settled()).collect();
    closed.sort_by_key(|w| w.date);
    closed
}

/// Cumulative profit over settled wagers, starting from a zero origin point.
pub fn build_cumulative_series(wagers: &[Wager]) -> Vec<SeriesPoint> {
    let closed = settled_by_date(wagers);

    let mut points = Vec::with_capacity(closed.len() + 1);
    points.push(SeriesPoint {
        label: ORIGIN_LABEL.to_string(),
        cumulative_profit: Decimal::ZERO,
    });

    let mut running = Decimal::ZERO;
    for wager in closed {
        running += wager.profit;
        points.push(SeriesPoint {
            label: wager.date.format("%d %b").to_string(),
            cumulative_profit: round_money(running),
        });
    }

    points
}

/// Sport with the highest summed settled profit, or `None` without settled wagers.
pub fn best_category(wagers: &[Wager]) -> Option<CategoryProfit> {
    let mut totals: Vec<(Sport, Decimal)> = Vec::new();
    for wager in wagers.iter().filter(|w| w.is_settled()) {
        match totals.iter_mut().find(|(sport, _)| *sport == wager.sport) {
            Some((_, profit)) => *profit += wager.profit,
            None => totals.push((wager.sport, wager.profit)),
        }
    }

    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
        .into_iter()
        .next()
        .map(|(name, profit)| CategoryProfit { name, profit })
}
