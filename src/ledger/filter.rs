use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::percentage;
use crate::models::{BetStatus, Wager};

/// List-view criteria. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct WagerFilter {
    pub status: Option<BetStatus>,
    pub bookmaker: Option<String>,
    /// Case-insensitive substring of description or bookmaker.
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickStats {
    pub profit: Decimal,
    #[serde(rename = "yield")]
    pub yield_pct: Decimal,
    pub count: usize,
}

impl WagerFilter {
    pub fn matches(&self, wager: &Wager) -> bool {
        if let Some(status) = self.status {
            if wager.status != status {
                return false;
            }
        }
        if let Some(bookmaker) = &self.bookmaker {
            if &wager.bookmaker != bookmaker {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                wager.description.to_lowercase().contains(&term)
                    || wager.bookmaker.to_lowercase().contains(&term)
            }
            _ => true,
        }
    }

    pub fn apply(&self, wagers: &[Wager]) -> Vec<Wager> {
        wagers.iter().filter(|w| self.matches(w)).cloned().collect()
    }
}

/// Profit and yield over the settled part of a (filtered) list.
pub fn quick_stats(wagers: &[Wager]) -> QuickStats {
    let (profit, stake) = wagers
        .iter()
        .filter(|w| w.is_settled())
        .fold((Decimal::ZERO, Decimal::ZERO), |(p, s), w| (p + w.profit, s + w.stake));

    QuickStats {
        profit,
        yield_pct: percentage(profit, stake),
        count: wagers.len(),
    }
}

/// Distinct non-empty bookmakers, sorted.
pub fn bookmakers(wagers: &[Wager]) -> Vec<String> {
    let mut names: Vec<String> = wagers
        .iter()
        .map(|w| w.bookmaker.clone())
        .filter(|b| !b.is_empty())
        .collect();
    names.sort();
    names.dedup();
    names
}
