use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ledger_constants::{TRANSACTION_KIND_BUY, TRANSACTION_KIND_SELL};
use super::ledger_errors::LedgerError;

/// One entry in the append-only transaction ledger.
///
/// `signed_quantity` is positive for buys and negative for sells. The sign
/// is derived from `kind` at construction; `kind` remains the source of
/// truth so a mislabeled row can be detected instead of silently
/// reclassified.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub ticker: String,
    pub signed_quantity: Decimal,
    /// Price per unit in native currency at transaction time.
    pub unit_price: Decimal,
    /// Native units per hard-currency unit recorded at transaction time.
    /// Historical; may differ from today's rate.
    pub exchange_rate: Decimal,
    pub transaction_date: DateTime<Utc>,
    pub kind: TransactionKind,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Builds a ledger entry from validated input, deriving the quantity
    /// sign from the kind.
    pub fn from_new(new: &NewTransaction) -> Self {
        let signed_quantity = match new.kind {
            TransactionKind::Buy => new.quantity,
            TransactionKind::Sell => -new.quantity,
        };
        Transaction {
            id: Uuid::new_v4().to_string(),
            ticker: new.normalized_ticker(),
            signed_quantity,
            unit_price: new.unit_price,
            exchange_rate: new.exchange_rate,
            transaction_date: new.transaction_date,
            kind: new.kind,
            created_at: Utc::now(),
        }
    }

    /// Magnitude of the traded quantity.
    pub fn quantity(&self) -> Decimal {
        self.signed_quantity.abs()
    }

    /// Checks the kind/sign invariant: `Sell` iff `signed_quantity < 0`.
    pub fn is_consistent(&self) -> bool {
        match self.kind {
            TransactionKind::Buy => self.signed_quantity.is_sign_positive(),
            TransactionKind::Sell => self.signed_quantity.is_sign_negative(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "SELL")]
    Sell,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Buy => TRANSACTION_KIND_BUY,
            TransactionKind::Sell => TRANSACTION_KIND_SELL,
        }
    }
}

impl FromStr for TransactionKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            TRANSACTION_KIND_BUY => Ok(TransactionKind::Buy),
            TRANSACTION_KIND_SELL => Ok(TransactionKind::Sell),
            other => Err(LedgerError::InvalidInput(format!(
                "Unknown transaction kind: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Input for recording a transaction. `quantity` is a positive magnitude;
/// the ledger sign is derived from `kind`.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub ticker: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub exchange_rate: Decimal,
    pub transaction_date: DateTime<Utc>,
    pub kind: TransactionKind,
}

impl NewTransaction {
    pub fn normalized_ticker(&self) -> String {
        self.ticker.trim().to_uppercase()
    }

    /// Rejects non-positive magnitudes and empty tickers before any store
    /// mutation happens.
    pub fn validate(&self) -> std::result::Result<(), LedgerError> {
        if self.normalized_ticker().is_empty() {
            return Err(LedgerError::InvalidInput("Ticker is empty".to_string()));
        }
        if !self.quantity.is_sign_positive() || self.quantity.is_zero() {
            return Err(LedgerError::InvalidInput(format!(
                "Quantity must be positive, got {}",
                self.quantity
            )));
        }
        if !self.unit_price.is_sign_positive() || self.unit_price.is_zero() {
            return Err(LedgerError::InvalidInput(format!(
                "Unit price must be positive, got {}",
                self.unit_price
            )));
        }
        if !self.exchange_rate.is_sign_positive() || self.exchange_rate.is_zero() {
            return Err(LedgerError::InvalidInput(format!(
                "Exchange rate must be positive, got {}",
                self.exchange_rate
            )));
        }
        Ok(())
    }
}
