use std::sync::RwLock;

use crate::ledger::ledger_errors::{LedgerError, Result};
use crate::ledger::{LedgerStore, Transaction};

/// Ledger store backed by process memory. Used by tests and by embedders
/// that persist elsewhere.
#[derive(Default)]
pub struct InMemoryLedgerStore {
    transactions: RwLock<Vec<Transaction>>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: RwLock::new(transactions),
        }
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn read_all(&self) -> Result<Vec<Transaction>> {
        let transactions = self
            .transactions
            .read()
            .map_err(|e| LedgerError::Store(e.to_string()))?;
        Ok(transactions.clone())
    }

    fn append(&self, transaction: Transaction) -> Result<Transaction> {
        let mut transactions = self
            .transactions
            .write()
            .map_err(|e| LedgerError::Store(e.to_string()))?;
        transactions.push(transaction.clone());
        Ok(transaction)
    }

    fn replace_all(&self, new_transactions: &[Transaction]) -> Result<()> {
        let mut transactions = self
            .transactions
            .write()
            .map_err(|e| LedgerError::Store(e.to_string()))?;
        *transactions = new_transactions.to_vec();
        Ok(())
    }
}
