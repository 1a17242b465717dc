// Tests for the ledger → holdings fold.

use crate::holdings::{net_quantity_for, CostBasisMethod, HoldingsCalculator};
use crate::ledger::{Transaction, TransactionKind};

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn dt(s: &str) -> DateTime<Utc> {
    NaiveDateTime::parse_from_str(&format!("{} 00:00:00", s), "%Y-%m-%d %H:%M:%S")
        .unwrap()
        .and_utc()
}

fn buy(id: &str, ticker: &str, date: &str, qty: Decimal, price: Decimal, rate: Decimal) -> Transaction {
    Transaction {
        id: id.to_string(),
        ticker: ticker.to_string(),
        signed_quantity: qty,
        unit_price: price,
        exchange_rate: rate,
        transaction_date: dt(date),
        kind: TransactionKind::Buy,
        created_at: dt(date),
    }
}

fn sell(id: &str, ticker: &str, date: &str, qty: Decimal, price: Decimal, rate: Decimal) -> Transaction {
    Transaction {
        id: id.to_string(),
        ticker: ticker.to_string(),
        signed_quantity: -qty,
        unit_price: price,
        exchange_rate: rate,
        transaction_date: dt(date),
        kind: TransactionKind::Sell,
        created_at: dt(date),
    }
}

#[test]
fn two_buys_accumulate_quantity_and_both_cost_bases() {
    // Buy 100 BNC @ 10 Bs (rate 40), buy 50 BNC @ 12 Bs (rate 45).
    let ledger = vec![
        buy("t1", "BNC", "2024-01-10", dec!(100), dec!(10), dec!(40)),
        buy("t2", "BNC", "2024-02-15", dec!(50), dec!(12), dec!(45)),
    ];

    let holdings = HoldingsCalculator::default().compute_holdings(&ledger);
    assert_eq!(holdings.len(), 1);

    let bnc = &holdings[0];
    assert_eq!(bnc.ticker, "BNC");
    assert_eq!(bnc.net_quantity, dec!(150));
    assert_eq!(bnc.cost_basis_native, dec!(1600));
    // 100×10/40 + 50×12/45 = 25 + 13.33…
    assert_eq!(bnc.cost_basis_hard.round_dp(2), dec!(38.33));
    assert_eq!(bnc.average_cost.round_dp(4), dec!(10.6667));
    assert_eq!(bnc.inception_date, dt("2024-01-10"));
}

#[test]
fn sell_reduces_basis_at_the_sale_price_in_ledger_price_mode() {
    // Same ledger plus Sell 60 BNC @ 14 Bs (rate 50).
    let ledger = vec![
        buy("t1", "BNC", "2024-01-10", dec!(100), dec!(10), dec!(40)),
        buy("t2", "BNC", "2024-02-15", dec!(50), dec!(12), dec!(45)),
        sell("t3", "BNC", "2024-03-20", dec!(60), dec!(14), dec!(50)),
    ];

    let holdings =
        HoldingsCalculator::new(CostBasisMethod::LedgerPrice).compute_holdings(&ledger);
    let bnc = &holdings[0];

    assert_eq!(bnc.net_quantity, dec!(90));
    // 1600 − 60×14
    assert_eq!(bnc.cost_basis_native, dec!(760));
    // 38.33… − 60×14/50
    assert_eq!(bnc.cost_basis_hard.round_dp(2), dec!(21.53));
}

#[test]
fn sell_reduces_basis_at_average_cost_in_average_cost_mode() {
    let ledger = vec![
        buy("t1", "BNC", "2024-01-10", dec!(100), dec!(10), dec!(40)),
        buy("t2", "BNC", "2024-02-15", dec!(50), dec!(12), dec!(45)),
        sell("t3", "BNC", "2024-03-20", dec!(60), dec!(14), dec!(50)),
    ];

    let holdings =
        HoldingsCalculator::new(CostBasisMethod::AverageCost).compute_holdings(&ledger);
    let bnc = &holdings[0];

    assert_eq!(bnc.net_quantity, dec!(90));
    // Average cost at sale is 1600/150; 60 units leave 90 × 10.66…
    assert_eq!(bnc.cost_basis_native.round_dp(2), dec!(960));
    // Hard basis shrinks proportionally: 38.33… × 90/150 = 23
    assert_eq!(bnc.cost_basis_hard.round_dp(6), dec!(23));
    // Average cost is unchanged by the sale.
    assert_eq!(bnc.average_cost.round_dp(4), dec!(10.6667));
}

#[test]
fn full_divestment_removes_the_ticker() {
    let ledger = vec![
        buy("t1", "BNC", "2024-01-10", dec!(100), dec!(10), dec!(40)),
        sell("t2", "BNC", "2024-02-15", dec!(100), dec!(14), dec!(45)),
    ];

    for method in [CostBasisMethod::LedgerPrice, CostBasisMethod::AverageCost] {
        let holdings = HoldingsCalculator::new(method).compute_holdings(&ledger);
        assert!(holdings.is_empty(), "{:?} should drop divested tickers", method);
    }
}

#[test]
fn residual_dust_below_epsilon_is_treated_as_divested() {
    let ledger = vec![
        buy("t1", "BNC", "2024-01-10", dec!(100), dec!(10), dec!(40)),
        sell("t2", "BNC", "2024-02-15", dec!(99.999999), dec!(14), dec!(45)),
    ];

    let holdings = HoldingsCalculator::default().compute_holdings(&ledger);
    assert!(holdings.is_empty());
}

#[test]
fn recomputation_is_idempotent() {
    let ledger = vec![
        buy("t1", "BNC", "2024-01-10", dec!(100), dec!(10), dec!(40)),
        buy("t2", "MVZ.A", "2024-01-12", dec!(30), dec!(7.5), dec!(40)),
        sell("t3", "BNC", "2024-02-15", dec!(25), dec!(11), dec!(42)),
    ];

    let calculator = HoldingsCalculator::default();
    let first = calculator.compute_holdings(&ledger);
    let second = calculator.compute_holdings(&ledger);
    assert_eq!(first, second);
}

#[test]
fn input_order_does_not_matter() {
    let ordered = vec![
        buy("t1", "BNC", "2024-01-10", dec!(100), dec!(10), dec!(40)),
        sell("t2", "BNC", "2024-02-15", dec!(40), dec!(11), dec!(42)),
    ];
    let shuffled = vec![ordered[1].clone(), ordered[0].clone()];

    let calculator = HoldingsCalculator::new(CostBasisMethod::AverageCost);
    assert_eq!(
        calculator.compute_holdings(&ordered),
        calculator.compute_holdings(&shuffled)
    );
}

#[test]
fn output_is_sorted_by_ticker() {
    let ledger = vec![
        buy("t1", "TDV.D", "2024-01-10", dec!(10), dec!(3), dec!(40)),
        buy("t2", "BNC", "2024-01-11", dec!(10), dec!(3), dec!(40)),
        buy("t3", "CANTV", "2024-01-12", dec!(10), dec!(3), dec!(40)),
    ];

    let holdings = HoldingsCalculator::default().compute_holdings(&ledger);
    let tickers: Vec<&str> = holdings.iter().map(|h| h.ticker.as_str()).collect();
    assert_eq!(tickers, vec!["BNC", "CANTV", "TDV.D"]);
}

#[test]
fn negative_net_is_divested_not_a_short_in_ledger_price_mode() {
    // A hand-edited sheet can oversell; ledger-price mode has no clamp, so
    // the fold ends negative. That is a divested ticker, not a short.
    let ledger = vec![
        buy("t1", "BNC", "2024-01-10", dec!(10), dec!(10), dec!(40)),
        sell("t2", "BNC", "2024-02-15", dec!(25), dec!(14), dec!(45)),
    ];

    let holdings =
        HoldingsCalculator::new(CostBasisMethod::LedgerPrice).compute_holdings(&ledger);
    assert!(holdings.is_empty());
}

#[test]
fn sell_only_window_yields_no_holding() {
    // A date window can catch a sell whose buy falls outside it.
    let ledger = vec![sell("t1", "BNC", "2024-02-15", dec!(40), dec!(14), dec!(45))];

    for method in [CostBasisMethod::LedgerPrice, CostBasisMethod::AverageCost] {
        let holdings = HoldingsCalculator::new(method).compute_holdings(&ledger);
        assert!(holdings.is_empty(), "{:?} should drop negative nets", method);
    }
}

#[test]
fn oversell_in_raw_ledger_clamps_in_average_cost_mode() {
    // Bypasses the recording guard on purpose: a hand-edited sheet can
    // contain a sell that exceeds the held quantity.
    let ledger = vec![
        buy("t1", "BNC", "2024-01-10", dec!(10), dec!(10), dec!(40)),
        sell("t2", "BNC", "2024-02-15", dec!(25), dec!(14), dec!(45)),
    ];

    let holdings =
        HoldingsCalculator::new(CostBasisMethod::AverageCost).compute_holdings(&ledger);
    assert!(holdings.is_empty());
}

#[test]
fn net_quantity_for_sums_only_the_requested_ticker() {
    let ledger = vec![
        buy("t1", "BNC", "2024-01-10", dec!(100), dec!(10), dec!(40)),
        buy("t2", "MVZ.A", "2024-01-12", dec!(30), dec!(7.5), dec!(40)),
        sell("t3", "BNC", "2024-02-15", dec!(25), dec!(11), dec!(42)),
    ];

    assert_eq!(net_quantity_for(&ledger, "BNC"), dec!(75));
    assert_eq!(net_quantity_for(&ledger, "MVZ.A"), dec!(30));
    assert_eq!(net_quantity_for(&ledger, "PTN"), dec!(0));
}
