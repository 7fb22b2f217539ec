use rust_decimal::Decimal;

use crate::models::BetStatus;

/// Realized profit of a wager at `status`.
///
/// `manual_amount` is the signed net result of a cash-out (not a gross
/// payout) and is ignored for every other status.
pub fn resolve_profit(
    odds: Decimal,
    stake: Decimal,
    status: BetStatus,
    manual_amount: Option<Decimal>,
) -> Decimal {
    match status {
        BetStatus::Pending => Decimal::ZERO,
        BetStatus::Won => odds * stake - stake,
        BetStatus::Lost => -stake,
        BetStatus::CashOut => manual_amount.unwrap_or(Decimal::ZERO),
        BetStatus::Refunded | BetStatus::Cancelled => Decimal::ZERO,
    }
}
