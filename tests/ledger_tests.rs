use chrono::NaiveDate;
use rust_decimal::Decimal;

use betledger::ledger::{
    aggregate, best_category, build_cumulative_series, initial_capital_for, resolve_profit, round_money,
    scope,
};
use betledger::models::{Bankroll, BetStatus, Scope, Sport, Wager};

fn wager(id: &str, bankroll_id: &str, day: u32, stake: &str, odds: &str, status: BetStatus) -> Wager {
    let stake: Decimal = stake.parse().unwrap();
    let odds: Decimal = odds.parse().unwrap();
    Wager {
        id: id.into(),
        bankroll_id: bankroll_id.into(),
        date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
        bookmaker: "Winamax".into(),
        sport: Sport::Football,
        odds,
        stake,
        status,
        profit: resolve_profit(odds, stake, status, None),
        description: String::new(),
    }
}

fn scenario() -> Vec<Wager> {
    vec![
        wager("a", "default", 1, "10", "2.0", BetStatus::Won),
        wager("b", "default", 2, "20", "1.5", BetStatus::Lost),
        wager("c", "default", 3, "5", "3.0", BetStatus::Pending),
    ]
}

#[test]
fn test_mixed_ledger_summary() {
    let wagers = scenario();
    let profits: Vec<Decimal> = wagers.iter().map(|w| w.profit).collect();
    assert_eq!(profits, vec![Decimal::from(10), Decimal::from(-20), Decimal::ZERO]);

    let stats = aggregate(&wagers, Decimal::from(1_000));
    assert_eq!(stats.total_profit, Decimal::from(-10));
    assert_eq!(round_money(stats.roi), Decimal::new(-3333, 2));
    assert_eq!(stats.roi, stats.yield_pct);
    assert_eq!(stats.win_rate, Decimal::from(50));
    assert_eq!(stats.total_bets, 3);
    assert_eq!(stats.active_bets, 1);
    assert_eq!(stats.current_bankroll, Decimal::from(990));
}

#[test]
fn test_series_ends_at_total_profit() {
    let wagers = scenario();
    let series = build_cumulative_series(&wagers);
    let stats = aggregate(&wagers, Decimal::ZERO);

    assert_eq!(series.len(), 3);
    assert_eq!(series[0].cumulative_profit, Decimal::ZERO);
    assert_eq!(series.last().unwrap().cumulative_profit, stats.total_profit);
    assert_eq!(series[1].label, "01 May");
}

#[test]
fn test_cash_out_with_gain_counts_as_win() {
    let mut cashed = wager("d", "default", 4, "10", "4.0", BetStatus::CashOut);
    cashed.profit = resolve_profit(cashed.odds, cashed.stake, BetStatus::CashOut, Some(Decimal::from(5)));
    let lost = wager("e", "default", 5, "10", "2.0", BetStatus::Lost);

    let stats = aggregate(&[cashed, lost], Decimal::ZERO);
    assert_eq!(stats.win_rate, Decimal::from(50));
    assert_eq!(stats.total_profit, Decimal::from(-5));
}

#[test]
fn test_scope_and_capital_for_deleted_bankroll() {
    let wagers = vec![
        wager("a", "main", 1, "10", "2.0", BetStatus::Won),
        wager("b", "side", 2, "10", "2.0", BetStatus::Lost),
        wager("c", "main", 3, "10", "2.0", BetStatus::Pending),
    ];
    let bankrolls = vec![Bankroll {
        id: "main".into(),
        name: "Main".into(),
        initial_capital: Decimal::from(500),
        color: "#e2001a".into(),
    }];

    assert_eq!(scope(&wagers, &Scope::All), wagers);

    let main_scoped = scope(&wagers, &Scope::Bankroll("main".into()));
    let main: Vec<&str> = main_scoped
        .iter()
        .map(|w| w.id.as_str())
        .collect();
    assert_eq!(main, vec!["a", "c"]);

    let side = Scope::Bankroll("side".into());
    assert_eq!(initial_capital_for(&bankrolls, &side), Decimal::ZERO);
    assert!(scope(&wagers, &Scope::Bankroll("gone".into())).is_empty());
}

#[test]
fn test_best_category_over_settled_wagers() {
    let mut tennis = wager("t", "default", 1, "10", "2.5", BetStatus::Won);
    tennis.sport = Sport::Tennis;
    let mut pending = wager("p", "default", 2, "100", "9.0", BetStatus::Pending);
    pending.sport = Sport::Basketball;
    let football = wager("f", "default", 3, "10", "1.5", BetStatus::Won);

    let best = best_category(&[football, tennis, pending]).unwrap();
    assert_eq!(best.name, Sport::Tennis);
    assert_eq!(best.profit, Decimal::from(15));

    assert!(best_category(&scenario()[2..]).is_none());
}
