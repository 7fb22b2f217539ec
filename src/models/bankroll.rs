use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::LedgerError;

pub const DEFAULT_BANKROLL_ID: &str = "default";
pub const DEFAULT_COLOR: &str = "#e2001a";

/// A named capital pool. Wagers reference it by id; deleting it orphans them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bankroll {
    pub id: String,
    pub name: String,
    pub initial_capital: Decimal,
    #[serde(default = "default_color")]
    pub color: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBankroll {
    pub name: String,
    pub initial_capital: Decimal,
    pub color: Option<String>,
}

/// Largest accepted starting capital.
pub fn max_initial_capital() -> Decimal {
    Decimal::from(1_000_000_000_000_000_i64)
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl Bankroll {
    /// The bankroll seeded when nothing has been stored yet.
    pub fn seed(initial_capital: Decimal) -> Self {
        Self {
            id: DEFAULT_BANKROLL_ID.to_string(),
            name: "Main Bankroll".to_string(),
            initial_capital,
            color: default_color(),
        }
    }

    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.name.trim().is_empty() {
            return Err(LedgerError::InvalidBankroll("name is required".into()));
        }
        if self.initial_capital < Decimal::ZERO || self.initial_capital > max_initial_capital() {
            return Err(LedgerError::InvalidBankroll(format!(
                "initial capital must be in [0, {}], got {}",
                max_initial_capital(),
                self.initial_capital
            )));
        }
        Ok(())
    }
}

impl NewBankroll {
    pub fn into_bankroll(self) -> Result<Bankroll, LedgerError> {
        self.into_bankroll_with_id(Uuid::new_v4().simple().to_string())
    }

    pub fn into_bankroll_with_id(self, id: String) -> Result<Bankroll, LedgerError> {
        let bankroll = Bankroll {
            id,
            name: self.name.trim().to_string(),
            initial_capital: self.initial_capital,
            color: self.color.unwrap_or_else(default_color),
        };
        bankroll.validate()?;
        Ok(bankroll)
    }
}
