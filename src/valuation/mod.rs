pub mod valuation_calculator;
pub mod valuation_model;

pub use valuation_calculator::{summarize, value_holdings};
pub use valuation_model::{PortfolioSummary, Valuation};
