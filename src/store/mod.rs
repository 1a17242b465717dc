pub mod csv_store;
pub mod memory_store;

pub use csv_store::CsvLedgerStore;
pub use memory_store::InMemoryLedgerStore;
