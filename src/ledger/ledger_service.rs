use chrono::{DateTime, Utc};
use log::debug;
use std::sync::Arc;

use crate::holdings::net_quantity_for;
use crate::ledger::ledger_errors::LedgerError;
use crate::ledger::ledger_model::{NewTransaction, Transaction, TransactionKind};
use crate::ledger::ledger_traits::LedgerStore;
use crate::{Error, Result};

/// Service for recording and reading ledger transactions.
pub struct LedgerService {
    store: Arc<dyn LedgerStore>,
}

impl LedgerService {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// Validates the input, enforces the no-short-position rule for sells,
    /// and appends exactly one transaction to the store.
    ///
    /// A sell is only accepted when the ticker's current net quantity,
    /// recomputed from the existing ledger, covers the requested magnitude.
    /// On rejection the store is left untouched.
    pub fn record_transaction(&self, new: NewTransaction) -> Result<Transaction> {
        new.validate()?;

        let ticker = new.normalized_ticker();
        if new.kind == TransactionKind::Sell {
            let existing = self.store.read_all().map_err(Error::from)?;
            let available = net_quantity_for(&existing, &ticker);
            if new.quantity > available {
                return Err(LedgerError::InsufficientHoldings {
                    ticker,
                    requested: new.quantity,
                    available,
                }
                .into());
            }
        }

        let transaction = Transaction::from_new(&new);
        debug!(
            "Recording {} {} {} @ {} (rate {})",
            transaction.kind,
            transaction.quantity(),
            transaction.ticker,
            transaction.unit_price,
            transaction.exchange_rate
        );
        Ok(self.store.append(transaction)?)
    }

    /// Full ledger, consistency-checked and sorted by transaction date.
    pub fn get_transactions(&self) -> Result<Vec<Transaction>> {
        self.get_transactions_since(None)
    }

    /// Ledger entries dated at or after `cutoff` (all of them when `None`),
    /// sorted by transaction date.
    pub fn get_transactions_since(
        &self,
        cutoff: Option<DateTime<Utc>>,
    ) -> Result<Vec<Transaction>> {
        let mut transactions = self.store.read_all().map_err(Error::from)?;

        for transaction in &transactions {
            if !transaction.is_consistent() {
                return Err(LedgerError::InconsistentEntry {
                    id: transaction.id.clone(),
                    kind: transaction.kind.as_str().to_string(),
                }
                .into());
            }
        }

        if let Some(cutoff) = cutoff {
            transactions.retain(|t| t.transaction_date >= cutoff);
        }
        transactions.sort_by(|a, b| {
            a.transaction_date
                .cmp(&b.transaction_date)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        Ok(transactions)
    }

    /// Current net quantity for a ticker, summed over the full ledger.
    pub fn net_quantity(&self, ticker: &str) -> Result<rust_decimal::Decimal> {
        let transactions = self.store.read_all().map_err(Error::from)?;
        Ok(net_quantity_for(&transactions, &ticker.trim().to_uppercase()))
    }
}
