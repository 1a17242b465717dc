use async_trait::async_trait;
use log::warn;
use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use yahoo_finance_api as yahoo;

use crate::market_data::market_data_errors::MarketDataError;
use crate::market_data::market_data_model::PriceMap;
use crate::market_data::market_data_traits::PriceProvider;

/// Live prices for internationally listed tickers via Yahoo Finance.
pub struct YahooProvider {
    provider: yahoo::YahooConnector,
}

impl YahooProvider {
    pub fn new() -> Result<Self, MarketDataError> {
        let provider = yahoo::YahooConnector::new()
            .map_err(|e| MarketDataError::ProviderError(e.to_string()))?;
        Ok(YahooProvider { provider })
    }

    async fn last_close(&self, symbol: &str) -> Result<Decimal, yahoo::YahooError> {
        let response = self.provider.get_latest_quotes(symbol, "1d").await?;
        let quote = response.last_quote()?;
        Decimal::from_f64(quote.close).ok_or(yahoo::YahooError::NoQuotes)
    }
}

#[async_trait]
impl PriceProvider for YahooProvider {
    async fn latest_prices(&self, symbols: &[String]) -> Result<PriceMap, MarketDataError> {
        let mut prices = PriceMap::new();
        for symbol in symbols {
            match self.last_close(symbol).await {
                Ok(price) => {
                    prices.insert(symbol.clone(), price);
                }
                // A symbol without a quote stays absent; the caller treats
                // it as unpriced.
                Err(e) => warn!("No Yahoo quote for {}: {}", symbol, e),
            }
        }
        Ok(prices)
    }
}
