use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A holding marked against a live price and today's exchange rate.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Valuation {
    pub ticker: String,
    pub quantity: Decimal,
    pub average_cost: Decimal,
    /// Zero when the price map has no entry for the ticker.
    pub current_price: Decimal,
    /// False means "unpriced": the price map had no entry and the market
    /// value is a placeholder zero, not a real mark.
    pub priced: bool,
    pub market_value_native: Decimal,
    pub market_value_hard: Decimal,
    pub cost_basis_native: Decimal,
    pub cost_basis_hard: Decimal,
    pub gain_native: Decimal,
    pub gain_hard: Decimal,
    /// gain_hard / cost_basis_hard × 100, zero when the basis is zero.
    pub return_pct: Decimal,
    /// Share of the portfolio's total native market value.
    pub allocation_pct: Decimal,
}

/// Portfolio-wide totals across all valuations.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub market_value_native: Decimal,
    pub market_value_hard: Decimal,
    pub cost_basis_native: Decimal,
    pub cost_basis_hard: Decimal,
    pub gain_native: Decimal,
    pub gain_hard: Decimal,
    pub return_pct: Decimal,
    pub position_count: usize,
}
