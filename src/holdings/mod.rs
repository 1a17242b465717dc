pub mod holdings_calculator;
pub mod holdings_model;

pub use holdings_calculator::{net_quantity_for, CostBasisMethod, HoldingsCalculator};
pub use holdings_model::{is_position_open, safe_div, Holding, QUANTITY_THRESHOLD, ROUNDING_SCALE};

#[cfg(test)]
pub(crate) mod tests;
