//! CSV-backed ledger store with whole-file read / whole-file rewrite
//! semantics, mirroring the spreadsheet connector the dashboards used.

use chrono::{DateTime, Utc};
use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use uuid::Uuid;

use crate::ledger::ledger_errors::{LedgerError, Result};
use crate::ledger::{LedgerStore, Transaction, TransactionKind};

/// On-disk row. Decimals travel as strings to keep full precision, and the
/// optional columns cover sheets that predate them.
#[derive(Serialize, Deserialize, Debug)]
struct CsvRow {
    id: Option<String>,
    ticker: String,
    kind: String,
    signed_quantity: String,
    unit_price: String,
    exchange_rate: Option<String>,
    transaction_date: String,
    created_at: Option<String>,
}

impl CsvRow {
    fn from_transaction(transaction: &Transaction) -> Self {
        CsvRow {
            id: Some(transaction.id.clone()),
            ticker: transaction.ticker.clone(),
            kind: transaction.kind.as_str().to_string(),
            signed_quantity: transaction.signed_quantity.to_string(),
            unit_price: transaction.unit_price.to_string(),
            exchange_rate: Some(transaction.exchange_rate.to_string()),
            transaction_date: transaction.transaction_date.to_rfc3339(),
            created_at: Some(transaction.created_at.to_rfc3339()),
        }
    }

    fn into_transaction(self, default_exchange_rate: Decimal) -> Result<Transaction> {
        let kind = TransactionKind::from_str(&self.kind)?;
        let signed_quantity = parse_decimal("signed_quantity", &self.signed_quantity)?;
        let unit_price = parse_decimal("unit_price", &self.unit_price)?;
        let exchange_rate = match self.exchange_rate.as_deref() {
            Some(raw) if !raw.trim().is_empty() => parse_decimal("exchange_rate", raw)?,
            // Rows that predate the exchange-rate column fall back to the
            // caller-supplied rate instead of failing.
            _ => default_exchange_rate,
        };
        let transaction_date = parse_date("transaction_date", &self.transaction_date)?;
        let created_at = match self.created_at.as_deref() {
            Some(raw) if !raw.trim().is_empty() => parse_date("created_at", raw)?,
            _ => transaction_date,
        };

        Ok(Transaction {
            id: self
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            ticker: self.ticker.trim().to_uppercase(),
            signed_quantity,
            unit_price,
            exchange_rate,
            transaction_date,
            kind,
            created_at,
        })
    }
}

fn parse_decimal(field: &str, raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw.trim())
        .map_err(|e| LedgerError::Store(format!("bad {} value {:?}: {}", field, raw, e)))
}

fn parse_date(field: &str, raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| LedgerError::Store(format!("bad {} value {:?}: {}", field, raw, e)))
}

/// Ledger store on a CSV file. Every append reads the full set and rewrites
/// it wholesale, the same way the sheet connector worked; the caller is
/// responsible for serializing concurrent edits.
pub struct CsvLedgerStore {
    path: PathBuf,
    /// Applied to legacy rows that lack an exchange-rate column.
    default_exchange_rate: Decimal,
}

impl CsvLedgerStore {
    pub fn new(path: impl Into<PathBuf>, default_exchange_rate: Decimal) -> Self {
        Self {
            path: path.into(),
            default_exchange_rate,
        }
    }

    fn load(&self) -> Result<Vec<Transaction>> {
        if !self.path.exists() {
            warn!("Ledger file {} not found; starting empty", self.path.display());
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)
            .map_err(|e| LedgerError::Store(e.to_string()))?;
        let mut transactions = Vec::new();
        for row in reader.deserialize::<CsvRow>() {
            let row = row.map_err(|e| LedgerError::Store(e.to_string()))?;
            transactions.push(row.into_transaction(self.default_exchange_rate)?);
        }
        Ok(transactions)
    }

    fn persist(&self, transactions: &[Transaction]) -> Result<()> {
        let mut writer = csv::Writer::from_path(&self.path)
            .map_err(|e| LedgerError::Store(e.to_string()))?;
        for transaction in transactions {
            writer
                .serialize(CsvRow::from_transaction(transaction))
                .map_err(|e| LedgerError::Store(e.to_string()))?;
        }
        writer.flush().map_err(|e| LedgerError::Store(e.to_string()))
    }
}

impl LedgerStore for CsvLedgerStore {
    fn read_all(&self) -> Result<Vec<Transaction>> {
        self.load()
    }

    fn append(&self, transaction: Transaction) -> Result<Transaction> {
        let mut transactions = self.load()?;
        transactions.push(transaction.clone());
        self.persist(&transactions)?;
        Ok(transaction)
    }

    fn replace_all(&self, transactions: &[Transaction]) -> Result<()> {
        self.persist(transactions)
    }
}
