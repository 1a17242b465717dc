use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ticker → current price in native currency. Absent entries mean
/// "unpriced", never an error.
pub type PriceMap = HashMap<String, Decimal>;

/// Where a quote or rate came from.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataSource {
    /// Entered by hand in the price table.
    Manual,
    Yahoo,
    /// Central-bank reference rate page.
    Bcv,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Manual => "MANUAL",
            DataSource::Yahoo => "YAHOO",
            DataSource::Bcv => "BCV",
        }
    }
}
