use chrono::{NaiveDate, Utc};
use log::{debug, warn};
use rust_decimal::Decimal;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use super::fx_errors::FxError;
use super::fx_model::ExchangeRate;
use super::fx_traits::RateProvider;
use crate::market_data::DataSource;

struct CachedRate {
    rate: ExchangeRate,
    fetched_at: Instant,
}

/// Time-boxed cache over a rate provider.
///
/// The rate page changes at most a few times a day, so every render pass
/// re-fetching it would be wasteful; within the TTL the cached observation
/// is served instead.
pub struct FxService {
    provider: Arc<dyn RateProvider>,
    cache: RwLock<Option<CachedRate>>,
    ttl: Duration,
}

impl FxService {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

    pub fn new(provider: Arc<dyn RateProvider>) -> Self {
        Self::with_ttl(provider, Self::DEFAULT_TTL)
    }

    pub fn with_ttl(provider: Arc<dyn RateProvider>, ttl: Duration) -> Self {
        Self {
            provider,
            cache: RwLock::new(None),
            ttl,
        }
    }

    /// Today's rate, from cache when fresh, otherwise from the provider.
    pub async fn current_rate(&self) -> Result<ExchangeRate, FxError> {
        {
            let cache = self
                .cache
                .read()
                .map_err(|e| FxError::CacheError(e.to_string()))?;
            if let Some(cached) = cache.as_ref() {
                if cached.fetched_at.elapsed() < self.ttl {
                    return Ok(cached.rate.clone());
                }
            }
        }

        let fresh = self.provider.latest_rate().await?;
        if !fresh.rate.is_sign_positive() || fresh.rate.is_zero() {
            return Err(FxError::InvalidRate(fresh.rate.to_string()));
        }

        let mut cache = self
            .cache
            .write()
            .map_err(|e| FxError::CacheError(e.to_string()))?;
        *cache = Some(CachedRate {
            rate: fresh.clone(),
            fetched_at: Instant::now(),
        });
        Ok(fresh)
    }

    /// Result-or-fallback: a failed fetch degrades to the supplied manual
    /// rate instead of blocking the report.
    pub async fn current_rate_or(&self, fallback: Decimal) -> ExchangeRate {
        match self.current_rate().await {
            Ok(rate) => rate,
            Err(e) => {
                warn!("Rate fetch failed ({}); using manual rate {}", e, fallback);
                ExchangeRate {
                    rate: fallback,
                    as_of: Utc::now(),
                    source: DataSource::Manual,
                }
            }
        }
    }

    /// Default rate suggestion for a dated transaction. Never errors; a
    /// provider without history (or a failed lookup) yields `None` and the
    /// user enters the rate by hand.
    pub async fn suggest_rate_for(&self, date: NaiveDate) -> Option<Decimal> {
        match self.provider.rate_on(date).await {
            Ok(Some(rate)) => Some(rate.rate),
            Ok(None) => None,
            Err(e) => {
                debug!("No rate suggestion for {}: {}", date, e);
                None
            }
        }
    }
}
