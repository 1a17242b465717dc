use rust_decimal::Decimal;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Invalid transaction input: {0}")]
    InvalidInput(String),

    #[error("Insufficient holdings for {ticker}: requested {requested}, available {available}")]
    InsufficientHoldings {
        ticker: String,
        requested: Decimal,
        available: Decimal,
    },

    #[error("Inconsistent ledger entry {id}: kind {kind} does not match the quantity sign")]
    InconsistentEntry { id: String, kind: String },

    #[error("Ledger store operation failed: {0}")]
    Store(String),
}
