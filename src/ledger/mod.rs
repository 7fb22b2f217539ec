//! Ledger aggregation engine.
//!
//! Pure functions over wager snapshots: profit resolution, bankroll scoping,
//! summary statistics and chart series. Nothing here touches the store.

pub mod breakdown;
pub mod filter;
pub mod profit;
pub mod scope;
pub mod series;
pub mod stats;

use rust_decimal::{Decimal, RoundingStrategy};

pub use profit::resolve_profit;
pub use scope::{initial_capital_for, scope};
pub use series::{best_category, build_cumulative_series, CategoryProfit, SeriesPoint};
pub use stats::{aggregate, SummaryStatistics};

/// `part / whole * 100`, or zero when `whole` is not positive.
/// Saturates at `Decimal::MAX`/`Decimal::MIN` instead of overflowing.
pub(crate) fn percentage(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(if part.is_sign_negative() { Decimal::MIN } else { Decimal::MAX })
}

/// Presentation rounding: two places, halves away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
