//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::model::{Transaction, TransactionFactory};
use crate::Config;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Test environment that sets up a fintrack home directory with a Config.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    /// Creates a test environment with an initialized home directory and no data file.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::create(temp_dir.path().join("fintrack")).unwrap();
        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    /// Returns a clone of the Config.
    pub fn config(&self) -> Config {
        self.config.clone()
    }

    /// Writes `transactions` straight to the data file.
    pub fn seed(&self, transactions: impl IntoIterator<Item = Transaction>) {
        let store = transactions.into_iter().collect();
        self.config.storage().save(&store).unwrap();
    }

    /// Reads the data file back.
    pub fn stored(&self) -> Vec<Transaction> {
        let store = self.config.storage().load().unwrap();
        store.all().cloned().collect()
    }
}

/// Builds a transaction from raw strings, panicking if they are invalid.
pub fn tx(t_type: &str, category: &str, amount: &str, date: &str, description: &str) -> Transaction {
    TransactionFactory::new()
        .create(t_type, category, amount, date, description)
        .unwrap()
}

/// Runs `f` with a subscriber that records every event at any level, and returns the formatted
/// log lines.
pub fn capture_logs(f: impl FnOnce()) -> String {
    let buf = LogBuffer::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = buf.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
