pub const TRANSACTION_KIND_BUY: &str = "BUY";
pub const TRANSACTION_KIND_SELL: &str = "SELL";
