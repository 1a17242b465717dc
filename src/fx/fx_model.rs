use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::market_data::DataSource;

/// One observation of the native-per-hard exchange rate.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    pub rate: Decimal,
    pub as_of: DateTime<Utc>,
    pub source: DataSource,
}
