use async_trait::async_trait;
use chrono::NaiveDate;

use super::fx_errors::FxError;
use super::fx_model::ExchangeRate;

/// Contract for an exchange-rate source.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Today's native-per-hard rate.
    async fn latest_rate(&self) -> Result<ExchangeRate, FxError>;

    /// Historical rate for `date`, if the provider keeps one. Used only as
    /// a default suggestion when recording dated transactions; callers
    /// never depend on it being present.
    async fn rate_on(&self, date: NaiveDate) -> Result<Option<ExchangeRate>, FxError> {
        let _ = date;
        Ok(None)
    }
}
