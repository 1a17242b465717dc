use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::market_data::DataSource;
use crate::valuation::{PortfolioSummary, Valuation};

/// Reporting window over transaction dates.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportPeriod {
    #[default]
    All,
    PastWeek,
    PastMonth,
    PastYear,
}

impl ReportPeriod {
    /// Inclusive lower bound for transaction dates, `None` for the full
    /// history.
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            ReportPeriod::All => None,
            ReportPeriod::PastWeek => Some(now - Duration::days(7)),
            ReportPeriod::PastMonth => Some(now - Duration::days(30)),
            ReportPeriod::PastYear => Some(now - Duration::days(365)),
        }
    }
}

/// Result of one full read-aggregate pass over the ledger.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioReport {
    pub period: ReportPeriod,
    /// Today's native-per-hard rate the valuations were marked at.
    pub exchange_rate: Decimal,
    pub rate_source: DataSource,
    pub generated_at: DateTime<Utc>,
    pub valuations: Vec<Valuation>,
    pub summary: PortfolioSummary,
}
