//! Reading and writing the ledger's durable JSON file.
//!
//! The file is a JSON object keyed by `YYYY-MM-DD` date strings. Each value is an array of
//! transaction records in insertion order:
//!
//! ```json
//! {
//!     "2025-09-30": [
//!         {
//!             "t_type": "income",
//!             "category": "salary",
//!             "amount": 20000,
//!             "date": "2025-09-30",
//!             "description": "September"
//!         }
//!     ]
//! }
//! ```

use crate::error::{LedgerError, LedgerResult};
use crate::model::{parse_date, Amount, Transaction, TransactionType};
use crate::{utils, Result, TransactionStore};
use anyhow::Context;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The persistence adapter. It is the only code that knows the on-disk representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonStorage {
    path: PathBuf,
}

/// The shape of one transaction in the file, before validation.
#[derive(Debug, Deserialize)]
struct TransactionRecord {
    t_type: TransactionType,
    category: String,
    amount: Amount,
    date: String,
    description: String,
}

/// The top-level object of the file. A date key may appear only once; a repeated key is an
/// error rather than letting the later array replace the earlier one.
struct DateBuckets(BTreeMap<String, Vec<TransactionRecord>>);

impl<'de> Deserialize<'de> for DateBuckets {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(DateBucketsVisitor)
    }
}

struct DateBucketsVisitor;

impl<'de> Visitor<'de> for DateBucketsVisitor {
    type Value = DateBuckets;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping dates to arrays of transactions")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<DateBuckets, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut buckets = BTreeMap::new();
        while let Some((key, records)) = map.next_entry::<String, Vec<TransactionRecord>>()? {
            match buckets.entry(key) {
                Entry::Occupied(existing) => {
                    return Err(de::Error::custom(format!(
                        "the date key '{}' appears more than once",
                        existing.key()
                    )));
                }
                Entry::Vacant(slot) => {
                    slot.insert(records);
                }
            }
        }
        Ok(DateBuckets(buckets))
    }
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file into a new store.
    ///
    /// A missing or zero-length file is a first run and yields an empty store.
    ///
    /// # Errors
    /// - `LedgerError::Deserialization` (inside the returned error) when the file is not a valid
    ///   ledger: malformed JSON, wrong field types, a date key that differs from a record's date, or
    ///   a record that violates the transaction rules (such as a negative amount).
    /// - An I/O error when the file exists but cannot be read.
    pub fn load(&self) -> Result<TransactionStore> {
        let contents = match utils::read_if_exists(&self.path)? {
            Some(contents) => contents,
            None => {
                debug!("No data file at {}, starting empty", self.path.display());
                return Ok(TransactionStore::new());
            }
        };
        if contents.trim().is_empty() {
            debug!("Data file {} is empty", self.path.display());
            return Ok(TransactionStore::new());
        }

        let DateBuckets(raw) = serde_json::from_str(&contents)
            .map_err(|e| LedgerError::deserialization(e.to_string()))
            .with_context(|| format!("Failed to parse the data file {}", self.path.display()))?;

        let store = decode(raw)
            .with_context(|| format!("Invalid transaction in {}", self.path.display()))?;
        debug!(
            "Loaded {} transactions from {}",
            store.len(),
            self.path.display()
        );
        Ok(store)
    }

    /// Writes the whole store to the file.
    ///
    /// The data is written to a temporary sibling file which is then renamed over the target, so
    /// an interrupted save leaves the previous file intact.
    pub fn save(&self, store: &TransactionStore) -> Result<()> {
        let json = encode(store)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            utils::make_dir(parent)?;
        }
        let tmp = self.temp_path();
        utils::write(&tmp, json)?;
        utils::rename(&tmp, &self.path)?;
        debug!("Saved {} transactions to {}", store.len(), self.path.display());
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("data.json"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn decode(raw: BTreeMap<String, Vec<TransactionRecord>>) -> LedgerResult<TransactionStore> {
    let mut store = TransactionStore::new();
    for (key, records) in raw {
        let key_date = parse_date(&key).map_err(|_| {
            LedgerError::deserialization(format!("'{key}' is not a YYYY-MM-DD date key"))
        })?;
        for record in records {
            let date = parse_date(&record.date).map_err(|_| {
                LedgerError::deserialization(format!(
                    "'{}' under {key} is not a YYYY-MM-DD date",
                    record.date
                ))
            })?;
            if date != key_date {
                return Err(LedgerError::deserialization(format!(
                    "A transaction dated {date} is filed under {key}"
                )));
            }
            let transaction = Transaction::new(
                record.t_type,
                record.category,
                record.amount,
                date,
                record.description,
            )
            .map_err(|e| LedgerError::deserialization(format!("{key}: {e}")))?;
            store.restore(transaction);
        }
    }
    Ok(store)
}

fn encode(store: &TransactionStore) -> Result<Vec<u8>> {
    let by_date: BTreeMap<String, &[Transaction]> = store
        .buckets()
        .map(|(date, bucket)| (date.format(crate::model::DATE_FORMAT).to_string(), bucket))
        .collect();

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    by_date
        .serialize(&mut serializer)
        .context("Unable to serialize the transactions")?;
    buf.push(b'\n');
    Ok(buf)
}
