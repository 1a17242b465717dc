use super::ledger_errors::Result;
use super::ledger_model::Transaction;

/// Contract for the external ledger store (spreadsheet, file, memory).
///
/// The store is the sole source of truth for holdings. Append semantics may
/// be implemented by reading the full set and rewriting it wholesale; the
/// caller is responsible for serializing concurrent edits.
pub trait LedgerStore: Send + Sync {
    fn read_all(&self) -> Result<Vec<Transaction>>;
    fn append(&self, transaction: Transaction) -> Result<Transaction>;
    fn replace_all(&self, transactions: &[Transaction]) -> Result<()>;
}
