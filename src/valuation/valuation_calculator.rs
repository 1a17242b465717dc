use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::valuation_model::{PortfolioSummary, Valuation};
use crate::holdings::{safe_div, Holding, ROUNDING_SCALE};
use crate::market_data::PriceMap;

const ONE_HUNDRED: Decimal = dec!(100);

/// Marks each holding against the supplied price map and today's exchange
/// rate (native units per hard unit).
///
/// Pure: one valuation per holding, order preserved. A ticker missing from
/// the price map is valued at zero and flagged `priced: false`; "unpriced"
/// is user-visible state, not an error.
pub fn value_holdings(
    holdings: &[Holding],
    prices: &PriceMap,
    exchange_rate_today: Decimal,
) -> Vec<Valuation> {
    if !exchange_rate_today.is_sign_positive() || exchange_rate_today.is_zero() {
        warn!(
            "Non-positive exchange rate {} supplied; hard-currency values will be zero",
            exchange_rate_today
        );
    }

    let mut valuations: Vec<Valuation> = holdings
        .iter()
        .map(|holding| {
            let (current_price, priced) = match prices.get(&holding.ticker) {
                Some(price) => (*price, true),
                None => {
                    warn!("No quote for {}; valuing at zero", holding.ticker);
                    (Decimal::ZERO, false)
                }
            };

            let market_value_native = holding.net_quantity * current_price;
            let market_value_hard = safe_div(market_value_native, exchange_rate_today);
            let gain_native = market_value_native - holding.cost_basis_native;
            let gain_hard = market_value_hard - holding.cost_basis_hard;
            let return_pct = safe_div(gain_hard, holding.cost_basis_hard) * ONE_HUNDRED;

            Valuation {
                ticker: holding.ticker.clone(),
                quantity: holding.net_quantity,
                average_cost: holding.average_cost,
                current_price,
                priced,
                market_value_native: market_value_native.round_dp(ROUNDING_SCALE),
                market_value_hard: market_value_hard.round_dp(ROUNDING_SCALE),
                cost_basis_native: holding.cost_basis_native,
                cost_basis_hard: holding.cost_basis_hard,
                gain_native: gain_native.round_dp(ROUNDING_SCALE),
                gain_hard: gain_hard.round_dp(ROUNDING_SCALE),
                return_pct: return_pct.round_dp(ROUNDING_SCALE),
                allocation_pct: Decimal::ZERO,
            }
        })
        .collect();

    // Allocation needs the total, so it is a second pass.
    let total_native: Decimal = valuations.iter().map(|v| v.market_value_native).sum();
    for valuation in &mut valuations {
        valuation.allocation_pct =
            (safe_div(valuation.market_value_native, total_native) * ONE_HUNDRED)
                .round_dp(ROUNDING_SCALE);
    }

    valuations
}

/// Sums a set of valuations into portfolio-wide totals. Empty input yields
/// an all-zero summary.
pub fn summarize(valuations: &[Valuation]) -> PortfolioSummary {
    let mut summary = PortfolioSummary {
        position_count: valuations.len(),
        ..Default::default()
    };
    for valuation in valuations {
        summary.market_value_native += valuation.market_value_native;
        summary.market_value_hard += valuation.market_value_hard;
        summary.cost_basis_native += valuation.cost_basis_native;
        summary.cost_basis_hard += valuation.cost_basis_hard;
        summary.gain_native += valuation.gain_native;
        summary.gain_hard += valuation.gain_hard;
    }
    summary.return_pct = (safe_div(summary.gain_hard, summary.cost_basis_hard) * ONE_HUNDRED)
        .round_dp(ROUNDING_SCALE);
    summary
}
