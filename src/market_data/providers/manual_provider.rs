use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::RwLock;

use crate::market_data::market_data_errors::MarketDataError;
use crate::market_data::market_data_model::PriceMap;
use crate::market_data::market_data_traits::PriceProvider;

/// Serves prices from a user-maintained table. Caracas quotes have no free
/// programmatic feed, so they are typed in by hand.
#[derive(Default)]
pub struct ManualPriceProvider {
    prices: RwLock<PriceMap>,
}

impl ManualPriceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prices(prices: PriceMap) -> Self {
        let normalized = prices
            .into_iter()
            .map(|(symbol, price)| (symbol.trim().to_uppercase(), price))
            .collect();
        Self {
            prices: RwLock::new(normalized),
        }
    }

    pub fn set_price(&self, symbol: &str, price: Decimal) -> Result<(), MarketDataError> {
        if price.is_sign_negative() {
            return Err(MarketDataError::InvalidPrice(format!(
                "{} for {}",
                price, symbol
            )));
        }
        let mut prices = self
            .prices
            .write()
            .map_err(|e| MarketDataError::CacheError(e.to_string()))?;
        prices.insert(symbol.trim().to_uppercase(), price);
        Ok(())
    }
}

#[async_trait]
impl PriceProvider for ManualPriceProvider {
    async fn latest_prices(&self, symbols: &[String]) -> Result<PriceMap, MarketDataError> {
        let prices = self
            .prices
            .read()
            .map_err(|e| MarketDataError::CacheError(e.to_string()))?;
        Ok(symbols
            .iter()
            .filter_map(|symbol| prices.get(symbol).map(|price| (symbol.clone(), *price)))
            .collect())
    }
}
