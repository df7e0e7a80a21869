mod backup;
pub mod args;
pub mod commands;
mod config;
mod error;
mod ledger;
pub mod model;
pub mod query;
mod render;
mod storage;
mod store;
mod utils;

#[cfg(test)]
mod test;

pub use config::Config;
pub use error::{ledger_error, report, Error, LedgerError, LedgerResult, Result};
pub use ledger::Ledger;
pub use storage::JsonStorage;
pub use store::TransactionStore;
