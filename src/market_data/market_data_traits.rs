use async_trait::async_trait;

use super::market_data_errors::MarketDataError;
use super::market_data_model::PriceMap;

/// Contract for a live price source.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Latest native-currency prices for the given symbols. Symbols the
    /// provider cannot price are simply absent from the result.
    async fn latest_prices(&self, symbols: &[String]) -> Result<PriceMap, MarketDataError>;
}
