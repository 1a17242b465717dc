use log::warn;
use rust_decimal::Decimal;
use std::sync::{Arc, RwLock};

use super::market_data_errors::MarketDataError;
use super::market_data_model::PriceMap;
use super::market_data_traits::PriceProvider;

/// Merges live provider quotes with the user's manual price table.
///
/// Manual overrides win over provider quotes; a failed provider fetch
/// degrades to the overrides alone instead of erroring, so a dead feed
/// leaves positions "unpriced" rather than blocking the report.
pub struct MarketDataService {
    provider: Arc<dyn PriceProvider>,
    overrides: RwLock<PriceMap>,
}

impl MarketDataService {
    pub fn new(provider: Arc<dyn PriceProvider>) -> Self {
        Self {
            provider,
            overrides: RwLock::new(PriceMap::new()),
        }
    }

    /// Sets (or replaces) the manual price for a ticker.
    pub fn set_manual_price(
        &self,
        symbol: &str,
        price: Decimal,
    ) -> Result<(), MarketDataError> {
        if price.is_sign_negative() {
            return Err(MarketDataError::InvalidPrice(format!(
                "{} for {}",
                price, symbol
            )));
        }
        let mut overrides = self
            .overrides
            .write()
            .map_err(|e| MarketDataError::CacheError(e.to_string()))?;
        overrides.insert(symbol.trim().to_uppercase(), price);
        Ok(())
    }

    pub fn clear_manual_price(&self, symbol: &str) -> Result<(), MarketDataError> {
        let mut overrides = self
            .overrides
            .write()
            .map_err(|e| MarketDataError::CacheError(e.to_string()))?;
        overrides.remove(&symbol.trim().to_uppercase());
        Ok(())
    }

    /// Current price map for the given symbols: provider quotes first,
    /// manual overrides layered on top.
    pub async fn price_map_for(&self, symbols: &[String]) -> Result<PriceMap, MarketDataError> {
        let mut prices = match self.provider.latest_prices(symbols).await {
            Ok(prices) => prices,
            Err(e) => {
                warn!("Price provider failed ({}); using manual prices only", e);
                PriceMap::new()
            }
        };

        let overrides = self
            .overrides
            .read()
            .map_err(|e| MarketDataError::CacheError(e.to_string()))?;
        for symbol in symbols {
            if let Some(price) = overrides.get(symbol) {
                prices.insert(symbol.clone(), *price);
            }
        }
        Ok(prices)
    }
}
