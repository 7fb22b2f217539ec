use rust_decimal::Decimal;

use crate::models::{Bankroll, Scope, Wager};

/// Narrow `wagers` to the selected bankroll, preserving order.
/// Unknown bankroll ids simply match nothing.
pub fn scope(wagers: &[Wager], selector: &Scope) -> Vec<Wager> {
    match selector {
        Scope::All => wagers.to_vec(),
        Scope::Bankroll(id) => wagers
            .iter()
            .filter(|w| &w.bankroll_id == id)
            .cloned()
            .collect(),
    }
}

/// Capital baseline for a scope: every bankroll for `All`, else the match (or zero).
pub fn initial_capital_for(bankrolls: &[Bankroll], selector: &Scope) -> Decimal {
    match selector {
        Scope::All => bankrolls.iter().map(|b| b.initial_capital).sum(),
        Scope::Bankroll(id) => bankrolls
            .iter()
            .find(|b| &b.id == id)
            .map(|b| b.initial_capital)
            .unwrap_or(Decimal::ZERO),
    }
}
