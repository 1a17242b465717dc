use std::collections::HashMap;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use rust_decimal::Decimal;

use super::holdings_model::{is_position_open, safe_div, Holding, ROUNDING_SCALE};
use crate::ledger::{Transaction, TransactionKind};

/// How a sell moves a position's cost basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CostBasisMethod {
    /// Reduce the basis by `quantity × sell price`. Realized gain stays
    /// folded into the basis.
    #[default]
    LedgerPrice,
    /// Reduce the basis at the position's average cost at time of sale,
    /// so realized gain leaves the basis untouched.
    AverageCost,
}

/// Net quantity currently held for `ticker`, summed over the given ledger.
pub fn net_quantity_for(transactions: &[Transaction], ticker: &str) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.ticker == ticker)
        .map(|t| t.signed_quantity)
        .sum()
}

/// Folds a transaction ledger into current per-ticker holdings.
///
/// Stateless; every call recomputes from the full ledger it is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoldingsCalculator {
    method: CostBasisMethod,
}

impl HoldingsCalculator {
    pub fn new(method: CostBasisMethod) -> Self {
        HoldingsCalculator { method }
    }

    pub fn method(&self) -> CostBasisMethod {
        self.method
    }

    /// Computes one holding per ticker with a significant net quantity.
    ///
    /// Transactions are processed in `transaction_date` order (`created_at`
    /// as tie-breaker) so the average-cost method sees sells against the
    /// basis that existed at the time. Fully divested tickers are filtered
    /// out. Output is sorted by ticker.
    pub fn compute_holdings(&self, transactions: &[Transaction]) -> Vec<Holding> {
        debug!(
            "Computing holdings from {} ledger entries ({:?})",
            transactions.len(),
            self.method
        );

        let mut ordered: Vec<&Transaction> = transactions.iter().collect();
        ordered.sort_by(|a, b| {
            a.transaction_date
                .cmp(&b.transaction_date)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });

        let mut states: HashMap<String, TickerState> = HashMap::new();
        for transaction in ordered {
            states
                .entry(transaction.ticker.clone())
                .or_insert_with(|| TickerState::new(transaction))
                .apply(transaction, self.method);
        }

        let mut holdings: Vec<Holding> = states
            .into_values()
            .filter_map(TickerState::finalize)
            .collect();
        holdings.sort_by(|a, b| a.ticker.cmp(&b.ticker));
        holdings
    }
}

/// Running aggregate for one ticker while folding the ledger.
struct TickerState {
    ticker: String,
    net_quantity: Decimal,
    cost_basis_native: Decimal,
    cost_basis_hard: Decimal,
    inception_date: DateTime<Utc>,
}

impl TickerState {
    fn new(first: &Transaction) -> Self {
        TickerState {
            ticker: first.ticker.clone(),
            net_quantity: Decimal::ZERO,
            cost_basis_native: Decimal::ZERO,
            cost_basis_hard: Decimal::ZERO,
            inception_date: first.transaction_date,
        }
    }

    fn apply(&mut self, transaction: &Transaction, method: CostBasisMethod) {
        if transaction.transaction_date < self.inception_date {
            self.inception_date = transaction.transaction_date;
        }

        match (transaction.kind, method) {
            (TransactionKind::Buy, _) | (TransactionKind::Sell, CostBasisMethod::LedgerPrice) => {
                // Signed sum: sells carry negative quantity and shrink the
                // basis at their own unit price.
                let native = transaction.signed_quantity * transaction.unit_price;
                self.net_quantity += transaction.signed_quantity;
                self.cost_basis_native += native;
                self.cost_basis_hard += safe_div(native, transaction.exchange_rate);
            }
            (TransactionKind::Sell, CostBasisMethod::AverageCost) => {
                let requested = transaction.signed_quantity.abs();
                let sold = if requested > self.net_quantity {
                    // The recording path prevents oversells; a raw ledger
                    // may still contain one. Clamp to the held quantity.
                    warn!(
                        "Sell of {} {} exceeds held quantity {}; clamping",
                        requested, self.ticker, self.net_quantity
                    );
                    self.net_quantity.max(Decimal::ZERO)
                } else {
                    requested
                };

                let avg_native = safe_div(self.cost_basis_native, self.net_quantity);
                let avg_hard = safe_div(self.cost_basis_hard, self.net_quantity);
                self.net_quantity -= sold;
                self.cost_basis_native -= sold * avg_native;
                self.cost_basis_hard -= sold * avg_hard;
            }
        }
    }

    fn finalize(self) -> Option<Holding> {
        // Signed check: a negative net (raw-ledger oversell, or a window
        // that caught the sell but not the buy) is divested, not a short.
        if !is_position_open(&self.net_quantity) {
            debug!("Excluding fully divested ticker {}", self.ticker);
            return None;
        }
        let average_cost = safe_div(self.cost_basis_native, self.net_quantity);
        Some(Holding {
            ticker: self.ticker,
            net_quantity: self.net_quantity.round_dp(ROUNDING_SCALE),
            cost_basis_native: self.cost_basis_native.round_dp(ROUNDING_SCALE),
            cost_basis_hard: self.cost_basis_hard.round_dp(ROUNDING_SCALE),
            average_cost: average_cost.round_dp(ROUNDING_SCALE),
            inception_date: self.inception_date,
        })
    }
}
