pub mod manual_provider;
pub mod yahoo_provider;

pub use manual_provider::ManualPriceProvider;
pub use yahoo_provider::YahooProvider;
