use chrono::Utc;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::fx::FxService;
use crate::holdings::{CostBasisMethod, Holding, HoldingsCalculator};
use crate::ledger::LedgerService;
use crate::market_data::MarketDataService;
use crate::portfolio::portfolio_model::{PortfolioReport, ReportPeriod};
use crate::valuation::{summarize, value_holdings};
use crate::Result;

/// Runs the full read-aggregate cycle: ledger → holdings → prices and rate
/// → valuations → summary. Recomputes everything on every call; there is
/// no stored snapshot to invalidate.
pub struct PortfolioService {
    ledger: Arc<LedgerService>,
    market_data: Arc<MarketDataService>,
    fx: Arc<FxService>,
    calculator: HoldingsCalculator,
}

impl PortfolioService {
    pub fn new(
        ledger: Arc<LedgerService>,
        market_data: Arc<MarketDataService>,
        fx: Arc<FxService>,
    ) -> Self {
        Self {
            ledger,
            market_data,
            fx,
            calculator: HoldingsCalculator::default(),
        }
    }

    pub fn with_cost_basis_method(mut self, method: CostBasisMethod) -> Self {
        self.calculator = HoldingsCalculator::new(method);
        self
    }

    /// Current holdings over the full ledger.
    pub fn holdings(&self) -> Result<Vec<Holding>> {
        let transactions = self.ledger.get_transactions()?;
        Ok(self.calculator.compute_holdings(&transactions))
    }

    /// Builds a report for the given period. `fallback_rate` is the manual
    /// rate used when the rate feed is unreachable.
    pub async fn report(
        &self,
        period: ReportPeriod,
        fallback_rate: Decimal,
    ) -> Result<PortfolioReport> {
        let generated_at = Utc::now();
        let transactions = self
            .ledger
            .get_transactions_since(period.cutoff(generated_at))?;
        let holdings = self.calculator.compute_holdings(&transactions);
        debug!(
            "Report over {:?}: {} transactions, {} holdings",
            period,
            transactions.len(),
            holdings.len()
        );

        let symbols: Vec<String> = holdings.iter().map(|h| h.ticker.clone()).collect();
        let prices = self.market_data.price_map_for(&symbols).await?;
        let rate = self.fx.current_rate_or(fallback_rate).await;

        let valuations = value_holdings(&holdings, &prices, rate.rate);
        let summary = summarize(&valuations);

        Ok(PortfolioReport {
            period,
            exchange_rate: rate.rate,
            rate_source: rate.source,
            generated_at,
            valuations,
            summary,
        })
    }
}
