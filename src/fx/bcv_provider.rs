//! Central-bank (BCV) USD reference rate, scraped from the public page.

use async_trait::async_trait;
use chrono::Utc;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use reqwest::Client;
use rust_decimal::Decimal;
use std::time::Duration;

use super::fx_errors::FxError;
use super::fx_model::ExchangeRate;
use super::fx_traits::RateProvider;
use crate::market_data::DataSource;

const BCV_URL: &str = "https://www.bcv.org.ve/";
const REQUEST_TIMEOUT_SECS: u64 = 30;

lazy_static! {
    // The USD quote sits in the `dolar` block. The page uses comma as the
    // decimal separator and dot for thousands.
    static ref USD_QUOTE_RE: Regex =
        Regex::new(r#"id="dolar"[\s\S]*?<strong>\s*([0-9.,]+)\s*</strong>"#)
            .expect("static regex must compile");
}

/// Scrapes the central bank's official USD/VES reference rate.
pub struct BcvRateProvider {
    client: Client,
}

impl BcvRateProvider {
    pub fn new() -> Result<Self, FxError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            // The BCV site serves an incomplete certificate chain.
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| FxError::FetchError(e.to_string()))?;
        Ok(Self { client })
    }

    fn parse_rate(body: &str) -> Result<Decimal, FxError> {
        let captures = USD_QUOTE_RE.captures(body).ok_or_else(|| {
            FxError::RateNotFound("USD quote not present in BCV page".to_string())
        })?;
        let raw = &captures[1];
        let normalized = raw.replace('.', "").replace(',', ".");
        normalized
            .parse::<Decimal>()
            .map_err(|e| FxError::ParseError(format!("{}: {}", raw, e)))
    }
}

#[async_trait]
impl RateProvider for BcvRateProvider {
    async fn latest_rate(&self) -> Result<ExchangeRate, FxError> {
        debug!("Fetching USD reference rate from {}", BCV_URL);
        let response = self
            .client
            .get(BCV_URL)
            .send()
            .await
            .map_err(|e| FxError::FetchError(e.to_string()))?;
        if !response.status().is_success() {
            return Err(FxError::FetchError(format!(
                "BCV returned {}",
                response.status()
            )));
        }
        let body = response
            .text()
            .await
            .map_err(|e| FxError::FetchError(e.to_string()))?;

        let rate = Self::parse_rate(&body)?;
        if !rate.is_sign_positive() || rate.is_zero() {
            return Err(FxError::InvalidRate(rate.to_string()));
        }

        Ok(ExchangeRate {
            rate,
            as_of: Utc::now(),
            source: DataSource::Bcv,
        })
    }
}
