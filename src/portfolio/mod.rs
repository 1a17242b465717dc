pub mod portfolio_model;
pub mod portfolio_service;

pub use portfolio_model::{PortfolioReport, ReportPeriod};
pub use portfolio_service::PortfolioService;
