use thiserror::Error;

#[derive(Error, Debug)]
pub enum FxError {
    #[error("Exchange rate fetch failed: {0}")]
    FetchError(String),

    #[error("Exchange rate not found: {0}")]
    RateNotFound(String),

    #[error("Could not parse exchange rate: {0}")]
    ParseError(String),

    #[error("Invalid exchange rate: {0}")]
    InvalidRate(String),

    #[error("Cache error: {0}")]
    CacheError(String),
}
