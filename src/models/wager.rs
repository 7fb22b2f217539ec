use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BetStatus, Sport};
use crate::errors::LedgerError;
use crate::ledger::profit::resolve_profit;

/// A single recorded bet. `profit` is derived and never edited on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wager {
    pub id: String,
    pub bankroll_id: String,
    pub date: NaiveDate,
    pub bookmaker: String,
    pub sport: Sport,
    pub odds: Decimal,
    pub stake: Decimal,
    pub status: BetStatus,
    pub profit: Decimal,
    #[serde(default)]
    pub description: String,
}

/// Create/edit payload. `manual_amount` is only read for `CASH_OUT`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWager {
    pub bankroll_id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub bookmaker: String,
    pub sport: Sport,
    pub odds: Decimal,
    pub stake: Decimal,
    #[serde(default = "default_status")]
    pub status: BetStatus,
    #[serde(default)]
    pub description: String,
    pub manual_amount: Option<Decimal>,
}

fn default_status() -> BetStatus {
    BetStatus::Pending
}

/// Largest accepted decimal odds.
pub fn max_odds() -> Decimal {
    Decimal::from(10_000)
}

/// Largest accepted stake.
pub fn max_stake() -> Decimal {
    Decimal::from(1_000_000_000)
}

/// Largest absolute cash-out result.
pub fn max_manual_amount() -> Decimal {
    max_odds() * max_stake()
}

/// Bounds shared by every path that stores a wager. Keeping odds, stake and
/// manual amounts inside these limits keeps every ledger sum and ratio
/// inside `Decimal`'s range.
pub fn check_amounts(
    odds: Decimal,
    stake: Decimal,
    manual_amount: Option<Decimal>,
) -> Result<(), LedgerError> {
    if odds <= Decimal::ZERO || odds > max_odds() {
        return Err(LedgerError::InvalidWager(format!(
            "odds must be in (0, {}], got {odds}",
            max_odds()
        )));
    }
    if stake <= Decimal::ZERO || stake > max_stake() {
        return Err(LedgerError::InvalidWager(format!(
            "stake must be in (0, {}], got {stake}",
            max_stake()
        )));
    }
    if let Some(amount) = manual_amount {
        if amount.abs() > max_manual_amount() {
            return Err(LedgerError::InvalidWager(format!(
                "cash-out amount exceeds {}, got {amount}",
                max_manual_amount()
            )));
        }
    }
    Ok(())
}

/// Status-change event: `(wagerId, newStatus, optionalManualAmount)`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub status: BetStatus,
    pub manual_amount: Option<Decimal>,
}

impl NewWager {
    pub fn validate(&self) -> Result<(), LedgerError> {
        let manual = self.manual_amount.filter(|_| self.status == BetStatus::CashOut);
        check_amounts(self.odds, self.stake, manual)?;
        if self.bankroll_id.trim().is_empty() {
            return Err(LedgerError::InvalidWager("bankrollId is required".into()));
        }
        Ok(())
    }

    /// Build a fresh wager with a generated id.
    pub fn into_wager(self) -> Result<Wager, LedgerError> {
        self.into_wager_with_id(Uuid::new_v4().simple().to_string())
    }

    /// Build a wager keeping an existing id (edits).
    pub fn into_wager_with_id(self, id: String) -> Result<Wager, LedgerError> {
        self.validate()?;
        let profit = resolve_profit(self.odds, self.stake, self.status, self.manual_amount);
        Ok(Wager {
            id,
            bankroll_id: self.bankroll_id,
            date: self.date,
            bookmaker: self.bookmaker.trim().to_string(),
            sport: self.sport,
            odds: self.odds,
            stake: self.stake,
            status: self.status,
            profit,
            description: self.description,
        })
    }
}

impl Wager {
    /// Move to `status` and recompute profit. Re-opening a settled wager is allowed.
    pub fn apply_status(&mut self, status: BetStatus, manual_amount: Option<Decimal>) {
        self.status = status;
        self.profit = resolve_profit(self.odds, self.stake, status, manual_amount);
    }

    /// Re-derive profit from stored fields. A cash-out's stored profit is its manual amount.
    pub fn recompute_profit(&mut self) {
        let manual = match self.status {
            BetStatus::CashOut => Some(self.profit),
            _ => None,
        };
        self.profit = resolve_profit(self.odds, self.stake, self.status, manual);
    }

    pub fn is_settled(&self) -> bool {
        self.status.is_settled()
    }

    /// Bounds check for stored wagers (backups). A cash-out's profit is its manual amount.
    pub fn validate(&self) -> Result<(), LedgerError> {
        let manual = match self.status {
            BetStatus::CashOut => Some(self.profit),
            _ => None,
        };
        check_amounts(self.odds, self.stake, manual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_wager(status: BetStatus) -> NewWager {
        NewWager {
            bankroll_id: "default".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            bookmaker: " Winamax ".into(),
            sport: Sport::Football,
            odds: Decimal::new(18, 1),
            stake: Decimal::from(10),
            status,
            description: "Over 2.5".into(),
            manual_amount: Some(Decimal::from(99)),
        }
    }

    #[test]
    fn test_into_wager_derives_profit() {
        let wager = new_wager(BetStatus::Won).into_wager().unwrap();
        assert_eq!(wager.profit, Decimal::from(8));
        assert_eq!(wager.bookmaker, "Winamax");
        assert!(!wager.id.is_empty());
    }

    #[test]
    fn test_manual_amount_ignored_unless_cash_out() {
        let wager = new_wager(BetStatus::Refunded).into_wager().unwrap();
        assert_eq!(wager.profit, Decimal::ZERO);
    }

    #[test]
    fn test_validate_rejects_non_positive_stake() {
        let mut nw = new_wager(BetStatus::Pending);
        nw.stake = Decimal::ZERO;
        assert!(matches!(nw.into_wager(), Err(LedgerError::InvalidWager(_))));
    }

    #[test]
    fn test_validate_rejects_oversized_amounts() {
        let mut nw = new_wager(BetStatus::Won);
        nw.odds = "10000000000000000000".parse().unwrap();
        nw.stake = "10000000000000000000".parse().unwrap();
        assert!(matches!(nw.into_wager(), Err(LedgerError::InvalidWager(_))));

        let mut nw = new_wager(BetStatus::CashOut);
        nw.manual_amount = Some(-(max_manual_amount() + Decimal::ONE));
        assert!(matches!(nw.into_wager(), Err(LedgerError::InvalidWager(_))));

        let mut nw = new_wager(BetStatus::Won);
        nw.manual_amount = Some(Decimal::MAX);
        assert!(nw.clone().into_wager().is_ok());
        nw.odds = max_odds();
        nw.stake = max_stake();
        nw.manual_amount = None;
        let wager = nw.into_wager().unwrap();
        assert_eq!(wager.profit, max_odds() * max_stake() - max_stake());
    }

    #[test]
    fn test_apply_status_reopens() {
        let mut wager = new_wager(BetStatus::Lost).into_wager().unwrap();
        assert_eq!(wager.profit, Decimal::from(-10));
        wager.apply_status(BetStatus::Pending, None);
        assert_eq!(wager.profit, Decimal::ZERO);
    }

    #[test]
    fn test_deserialize_legacy_numbers() {
        let raw = r#"{"id":"k3j2","bankrollId":"default","date":"2024-01-02","bookmaker":"Bet365",
            "sport":"Tenis","odds":2.1,"stake":5,"status":"CASH_OUT","profit":-2.5,"description":""}"#;
        let wager: Wager = serde_json::from_str(raw).unwrap();
        assert_eq!(wager.sport, Sport::Tennis);
        assert_eq!(wager.profit, Decimal::new(-25, 1));
    }
}
