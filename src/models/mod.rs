pub mod bankroll;
pub mod wager;

pub use bankroll::{Bankroll, NewBankroll};
pub use wager::{check_amounts, NewWager, StatusChange, Wager};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::LedgerError;

// ---------------------------------------------------------------------------
// BetStatus
// ---------------------------------------------------------------------------

/// Settlement state of a wager. `Pending` is the only initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BetStatus {
    Pending,
    Won,
    Lost,
    Cancelled,
    Refunded,
    CashOut,
}

impl BetStatus {
    pub const ALL: [BetStatus; 6] = [
        BetStatus::Pending,
        BetStatus::Won,
        BetStatus::Lost,
        BetStatus::Cancelled,
        BetStatus::Refunded,
        BetStatus::CashOut,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BetStatus::Pending => "PENDING",
            BetStatus::Won => "WON",
            BetStatus::Lost => "LOST",
            BetStatus::Cancelled => "CANCELLED",
            BetStatus::Refunded => "REFUNDED",
            BetStatus::CashOut => "CASH_OUT",
        }
    }

    /// Settled (closed) wagers take part in profit, yield and win rate.
    pub fn is_settled(&self) -> bool {
        !matches!(self, BetStatus::Pending)
    }
}

impl FromStr for BetStatus {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PENDING" => Ok(BetStatus::Pending),
            "WON" => Ok(BetStatus::Won),
            "LOST" => Ok(BetStatus::Lost),
            "CANCELLED" => Ok(BetStatus::Cancelled),
            "REFUNDED" => Ok(BetStatus::Refunded),
            "CASH_OUT" => Ok(BetStatus::CashOut),
            _ => Err(LedgerError::UnknownStatus(s.to_string())),
        }
    }
}

impl fmt::Display for BetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Sport
// ---------------------------------------------------------------------------

/// Sport taxonomy. Legacy backups carry Spanish labels, accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sport {
    #[serde(alias = "Fútbol")]
    Football,
    #[serde(alias = "Baloncesto")]
    Basketball,
    #[serde(alias = "Tenis")]
    Tennis,
    #[serde(rename = "eSports")]
    ESports,
    #[serde(alias = "Béisbol")]
    Baseball,
    #[serde(rename = "American Football", alias = "NFL")]
    AmericanFootball,
    #[serde(rename = "MMA")]
    Mma,
    #[serde(alias = "Ciclismo")]
    Cycling,
    F1,
    MotoGP,
    #[serde(alias = "Boxeo")]
    Boxing,
    #[serde(alias = "Caballos")]
    Horses,
    #[serde(alias = "Otros")]
    Other,
}

impl Sport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sport::Football => "Football",
            Sport::Basketball => "Basketball",
            Sport::Tennis => "Tennis",
            Sport::ESports => "eSports",
            Sport::Baseball => "Baseball",
            Sport::AmericanFootball => "American Football",
            Sport::Mma => "MMA",
            Sport::Cycling => "Cycling",
            Sport::F1 => "F1",
            Sport::MotoGP => "MotoGP",
            Sport::Boxing => "Boxing",
            Sport::Horses => "Horses",
            Sport::Other => "Other",
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Scope
// ---------------------------------------------------------------------------

/// Active bankroll filter. Travels over the wire as `"all"` or a bankroll id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Scope {
    #[default]
    All,
    Bankroll(String),
}

impl Scope {
    pub const ALL_SENTINEL: &'static str = "all";

    pub fn parse(selector: &str) -> Self {
        let selector = selector.trim();
        if selector.is_empty() || selector == Self::ALL_SENTINEL {
            Scope::All
        } else {
            Scope::Bankroll(selector.to_string())
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::All => f.write_str(Self::ALL_SENTINEL),
            Scope::Bankroll(id) => f.write_str(id),
        }
    }
}

impl Serialize for Scope {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Scope {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Scope::parse(&raw))
    }
}
