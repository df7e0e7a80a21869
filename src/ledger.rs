//! The store paired with its durable file.

use crate::model::Transaction;
use crate::{JsonStorage, Result, TransactionStore};
use anyhow::Context;
use chrono::NaiveDate;

/// A `TransactionStore` that writes itself to its `JsonStorage` after every change.
///
/// There is no deferred flush and no close step: once a mutating call returns `Ok`, the change is
/// on disk. If the save fails the error is returned and the in-memory store keeps the change.
#[derive(Debug)]
pub struct Ledger {
    store: TransactionStore,
    storage: JsonStorage,
}

impl Ledger {
    /// Loads the store from `storage`.
    ///
    /// A corrupt data file is an error. The file is never replaced by an empty ledger behind the
    /// user's back.
    pub fn open(storage: JsonStorage) -> Result<Self> {
        let store = storage.load()?;
        Ok(Self { store, storage })
    }

    pub fn store(&self) -> &TransactionStore {
        &self.store
    }

    pub fn storage(&self) -> &JsonStorage {
        &self.storage
    }

    /// Inserts `transaction` and saves.
    pub fn add(&mut self, transaction: Transaction) -> Result<()> {
        self.store.insert(transaction);
        self.flush()
    }

    /// Deletes every exact match of `criteria` and saves. Returns the number removed.
    pub fn remove(&mut self, criteria: &Transaction) -> Result<usize> {
        let removed = self.store.delete(criteria)?;
        self.flush()?;
        Ok(removed)
    }

    /// Deletes the transaction at the 1-based `position` on `date` and saves.
    pub fn remove_at(&mut self, date: NaiveDate, position: usize) -> Result<Transaction> {
        let removed = self.store.delete_at(date, position)?;
        self.flush()?;
        Ok(removed)
    }

    fn flush(&self) -> Result<()> {
        self.storage
            .save(&self.store)
            .context("The change was made but could not be saved")
    }
}
