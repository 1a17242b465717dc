use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const ROUNDING_SCALE: u32 = 8;

/// Net quantities below this are treated as fully divested. Absorbs the
/// fractional drift left behind by partial sells.
pub const QUANTITY_THRESHOLD: &str = "0.00001";

/// Whether a net quantity still counts as an open position. Signed: zero,
/// dust, and negative nets (a raw ledger can oversell) are all divested.
pub fn is_position_open(quantity: &Decimal) -> bool {
    let threshold =
        Decimal::from_str_radix(QUANTITY_THRESHOLD, 10).unwrap_or_else(|_| Decimal::new(1, 5));
    *quantity >= threshold
}

/// Zero-denominator guard shared by cost-basis and ratio math. Any division
/// against a zero denominator resolves to zero instead of erroring.
pub fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}

/// Current position for one ticker, derived from the ledger. Never
/// persisted; recomputed in full on every read.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub ticker: String,
    pub net_quantity: Decimal,
    /// Sum of signed quantity × unit price, in native currency.
    pub cost_basis_native: Decimal,
    /// Cost basis converted at each transaction's own historical rate,
    /// not today's rate.
    pub cost_basis_hard: Decimal,
    pub average_cost: Decimal,
    /// Date of the earliest transaction for the ticker.
    pub inception_date: DateTime<Utc>,
}
