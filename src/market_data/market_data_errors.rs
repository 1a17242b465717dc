use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("Price fetch failed: {0}")]
    FetchFailed(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Cache error: {0}")]
    CacheError(String),
}
