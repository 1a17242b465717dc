pub mod errors;
pub mod fx;
pub mod holdings;
pub mod ledger;
pub mod market_data;
pub mod portfolio;
pub mod store;
pub mod valuation;

pub use errors::{Error, Result};
pub use holdings::{CostBasisMethod, Holding, HoldingsCalculator};
pub use ledger::{LedgerService, LedgerStore, NewTransaction, Transaction, TransactionKind};
pub use portfolio::{PortfolioReport, PortfolioService, ReportPeriod};
pub use valuation::{PortfolioSummary, Valuation};
