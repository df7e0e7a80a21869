//! The in-memory, date-indexed collection of transactions.

use crate::error::{LedgerError, LedgerResult};
use crate::model::Transaction;
use crate::query;
use chrono::{Local, NaiveDate};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Holds every transaction of the ledger, grouped by date.
///
/// Dates are kept in ascending order and transactions keep their insertion order within a date.
/// Each transaction lives in the bucket keyed by its own date, and a bucket is dropped as soon as
/// it becomes empty, so a date key is present if and only if there is a transaction on that date.
///
/// All lookups return lazy iterators that borrow the store. They are `Clone`, so a result can be
/// walked more than once (e.g. once for display and once for a total).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TransactionStore {
    data: BTreeMap<NaiveDate, Vec<Transaction>>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `transaction` to the bucket for its date.
    pub fn insert(&mut self, transaction: Transaction) {
        info!(
            "Added transaction | type={} | amount={} | category={} | date={}",
            transaction.t_type(),
            transaction.amount(),
            transaction.category(),
            transaction.date()
        );
        self.restore(transaction);
    }

    /// Appends a transaction read back from the data file. Unlike `insert` this is not logged as
    /// a change.
    pub(crate) fn restore(&mut self, transaction: Transaction) {
        self.data
            .entry(transaction.date())
            .or_default()
            .push(transaction);
    }

    /// Counts the transactions equal to `criteria`.
    ///
    /// # Errors
    /// - `TransactionNotFound` if nothing matches.
    pub fn matching(&self, criteria: &Transaction) -> LedgerResult<usize> {
        let date = criteria.date();
        let count = self
            .data
            .get(&date)
            .map_or(0, |bucket| bucket.iter().filter(|t| *t == criteria).count());
        if count == 0 {
            return Err(LedgerError::transaction_not_found(format!(
                "No {} transaction of {} in '{}' was found on {date}.",
                criteria.t_type(),
                criteria.amount(),
                criteria.category()
            )));
        }
        Ok(count)
    }

    /// Removes every transaction equal to `criteria` (same type, category, amount, date and
    /// description) and returns how many were removed.
    ///
    /// # Errors
    /// - `TransactionNotFound` if nothing matches.
    pub fn delete(&mut self, criteria: &Transaction) -> LedgerResult<usize> {
        let removed = self.matching(criteria)?;
        let date = criteria.date();
        if let Some(bucket) = self.data.get_mut(&date) {
            bucket.retain(|t| t != criteria);
        }
        self.drop_if_empty(date);
        info!("Deleted {removed} transaction(s) on {date}");
        Ok(removed)
    }

    /// Removes the transaction at the 1-based `position` among the transactions on `date`.
    ///
    /// # Errors
    /// - `DateNotFound` if there are no transactions on `date`.
    /// - `InvalidInput` if `position` is outside `1..=n`.
    pub fn delete_at(&mut self, date: NaiveDate, position: usize) -> LedgerResult<Transaction> {
        let bucket = self
            .data
            .get_mut(&date)
            .ok_or_else(|| no_transactions_on(date))?;
        if position == 0 || position > bucket.len() {
            return Err(LedgerError::invalid_input(format!(
                "Position {position} is invalid. Choose a number from 1 to {}.",
                bucket.len()
            )));
        }
        let removed = bucket.remove(position - 1);
        self.drop_if_empty(date);
        info!(
            "Deleted transaction #{position} on {date} | type={} | amount={} | category={}",
            removed.t_type(),
            removed.amount(),
            removed.category()
        );
        Ok(removed)
    }

    fn drop_if_empty(&mut self, date: NaiveDate) {
        if self.data.get(&date).is_some_and(Vec::is_empty) {
            let _ = self.data.remove(&date);
        }
    }

    /// Every transaction, by ascending date and then insertion order.
    pub fn all(&self) -> impl Iterator<Item = &Transaction> + Clone + '_ {
        self.data.values().flatten()
    }

    /// Transactions whose category is exactly `category` (case-sensitive).
    ///
    /// # Errors
    /// - `CategoryNotFound` if there are none.
    pub fn by_category<'a>(
        &'a self,
        category: &'a str,
    ) -> LedgerResult<impl Iterator<Item = &'a Transaction> + Clone + 'a> {
        query::with_category(self.all(), category)
    }

    /// Transactions dated within `[start, end]`.
    ///
    /// A missing `start` means the earliest representable date; a missing `end` means today.
    ///
    /// # Errors
    /// - `DateNotFound` if `start > end` or if no transaction falls in the range.
    pub fn by_date_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> LedgerResult<impl Iterator<Item = &Transaction> + Clone + '_> {
        let start = start.unwrap_or(NaiveDate::MIN);
        let end = end.unwrap_or_else(|| Local::now().date_naive());
        if start > end {
            return Err(LedgerError::date_not_found(format!(
                "The start date {start} cannot be later than the end date {end}."
            )));
        }
        let mut dates = self.data.range(start..=end).peekable();
        if dates.peek().is_none() {
            return Err(LedgerError::date_not_found(format!(
                "No transactions found between {start} and {end}."
            )));
        }
        debug!("Date range {start}..={end} selected");
        Ok(self
            .data
            .range(start..=end)
            .flat_map(|(_, bucket)| bucket.iter()))
    }

    /// The transactions recorded on `date`, in insertion order.
    ///
    /// # Errors
    /// - `DateNotFound` if there are none.
    pub fn on_date(&self, date: NaiveDate) -> LedgerResult<&[Transaction]> {
        self.data
            .get(&date)
            .map(Vec::as_slice)
            .ok_or_else(|| no_transactions_on(date))
    }

    /// The dates that have at least one transaction, ascending.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.data.keys().copied()
    }

    /// Each date with its transactions, ascending by date.
    pub fn buckets(&self) -> impl Iterator<Item = (NaiveDate, &[Transaction])> + '_ {
        self.data.iter().map(|(date, bucket)| (*date, bucket.as_slice()))
    }

    /// The total number of transactions.
    pub fn len(&self) -> usize {
        self.data.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

fn no_transactions_on(date: NaiveDate) -> LedgerError {
    LedgerError::date_not_found(format!("No transactions found on {date}."))
}

impl FromIterator<Transaction> for TransactionStore {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        let mut store = TransactionStore::new();
        store.extend(iter);
        store
    }
}

impl Extend<Transaction> for TransactionStore {
    fn extend<I: IntoIterator<Item = Transaction>>(&mut self, iter: I) {
        for transaction in iter {
            self.insert(transaction);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TransactionFactory;
    use crate::query::{total, Summary};
    use crate::model::TransactionType;
    use rust_decimal::Decimal;

    fn date(s: &str) -> NaiveDate {
        crate::model::parse_date(s).unwrap()
    }

    fn tx(t_type: &str, category: &str, amount: &str, date: &str, description: &str) -> Transaction {
        TransactionFactory::new()
            .create(t_type, category, amount, date, description)
            .unwrap()
    }

    fn sample() -> TransactionStore {
        [
            tx("income", "salary", "20000", "2025-09-30", "September"),
            tx("expense", "groceries", "54.20", "2025-10-02", "Market"),
            tx("expense", "rent", "1200", "2025-10-01", ""),
            tx("expense", "groceries", "12.80", "2025-10-02", "Bakery"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_insert_then_all_contains_exactly_one() {
        let mut store = sample();
        let t = tx("income", "gift", "15", "2025-10-05", "Birthday");
        store.insert(t.clone());
        assert_eq!(store.all().filter(|x| **x == t).count(), 1);
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_all_is_date_then_insertion_ordered() {
        let store = sample();
        let descriptions: Vec<&str> = store.all().map(Transaction::description).collect();
        assert_eq!(descriptions, vec!["September", "", "Market", "Bakery"]);
    }

    #[test]
    fn test_all_is_restartable() {
        let store = sample();
        let it = store.all();
        assert_eq!(it.clone().count(), it.count());
        assert_eq!(store.all().count(), 4);
    }

    #[test]
    fn test_delete_removes_and_second_delete_fails() {
        let mut store = sample();
        let t = tx("expense", "rent", "1200.00", "2025-10-01", "");
        assert_eq!(store.delete(&t).unwrap(), 1);
        assert!(store.all().all(|x| *x != t));
        // the bucket for 2025-10-01 held only the rent
        assert!(store.dates().all(|d| d != date("2025-10-01")));
        let err = store.delete(&t).unwrap_err();
        assert!(matches!(err, LedgerError::TransactionNotFound(_)));
    }

    #[test]
    fn test_delete_removes_all_exact_duplicates() {
        let mut store = sample();
        let t = tx("expense", "coffee", "3", "2025-10-02", "");
        store.insert(t.clone());
        store.insert(t.clone());
        assert_eq!(store.delete(&t).unwrap(), 2);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_delete_requires_every_field_to_match() {
        let mut store = sample();
        let almost = tx("expense", "groceries", "54.20", "2025-10-02", "Bakery");
        assert!(store.delete(&almost).is_err());
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_matching_counts_without_removing() {
        let mut store = sample();
        let t = tx("expense", "coffee", "3", "2025-10-02", "");
        store.insert(t.clone());
        store.insert(t.clone());
        assert_eq!(store.matching(&t).unwrap(), 2);
        assert_eq!(store.len(), 6);
        let absent = tx("expense", "coffee", "3", "2025-10-03", "");
        let err = store.matching(&absent).unwrap_err();
        assert!(matches!(err, LedgerError::TransactionNotFound(_)));
    }

    #[test]
    fn test_delete_at() {
        let mut store = sample();
        let removed = store.delete_at(date("2025-10-02"), 2).unwrap();
        assert_eq!(removed.description(), "Bakery");
        assert_eq!(store.on_date(date("2025-10-02")).unwrap().len(), 1);

        let err = store.delete_at(date("2025-10-02"), 2).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput(_)));
        let err = store.delete_at(date("2025-10-02"), 0).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput(_)));
        let err = store.delete_at(date("2020-01-01"), 1).unwrap_err();
        assert!(matches!(err, LedgerError::DateNotFound(_)));
    }

    #[test]
    fn test_by_category() {
        let store = [tx("income", "salary", "20000", "2025-09-30", "")]
            .into_iter()
            .collect::<TransactionStore>();
        let found: Vec<_> = store.by_category("salary").unwrap().collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].amount().value(), Decimal::from(20000));

        let err = store.by_category("rent").err().unwrap();
        assert!(matches!(err, LedgerError::CategoryNotFound(_)));
    }

    #[test]
    fn test_by_category_is_case_sensitive() {
        let store = sample();
        assert!(store.by_category("Groceries").is_err());
        assert_eq!(store.by_category("groceries").unwrap().count(), 2);
    }

    #[test]
    fn test_by_date_range_inclusive() {
        let store = sample();
        let found: Vec<_> = store
            .by_date_range(Some(date("2025-09-30")), Some(date("2025-10-01")))
            .unwrap()
            .collect();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_by_date_range_income_total() {
        let store = [tx("income", "salary", "20000", "2025-09-30", "")]
            .into_iter()
            .collect::<TransactionStore>();
        let result = store
            .by_date_range(Some(date("2010-10-10")), Some(date("2025-10-10")))
            .unwrap();
        assert_eq!(result.clone().count(), 1);
        assert_eq!(
            total(result, TransactionType::Income).to_string(),
            "20000.00"
        );
    }

    #[test]
    fn test_by_date_range_defaults() {
        let store = sample();
        // no start: from the beginning of time; no end: today, which is after the sample dates
        assert_eq!(store.by_date_range(None, None).unwrap().count(), 4);
        assert_eq!(
            store
                .by_date_range(None, Some(date("2025-10-01")))
                .unwrap()
                .count(),
            2
        );
    }

    #[test]
    fn test_by_date_range_errors() {
        let store = sample();
        let err = store
            .by_date_range(Some(date("2025-10-10")), Some(date("2025-10-01")))
            .err()
            .unwrap();
        assert!(matches!(err, LedgerError::DateNotFound(_)));

        let err = store
            .by_date_range(Some(date("2024-01-01")), Some(date("2024-12-31")))
            .err()
            .unwrap();
        assert!(matches!(err, LedgerError::DateNotFound(_)));
    }

    #[test]
    fn test_category_within_range_composes() {
        let store = sample();
        let in_range = store
            .by_date_range(Some(date("2025-10-01")), Some(date("2025-10-31")))
            .unwrap();
        let groceries = query::with_category(in_range, "groceries").unwrap();
        let summary = Summary::of(groceries);
        assert_eq!(summary.expense().to_string(), "67.00");
        assert!(summary.income().is_zero());
    }

    #[test]
    fn test_on_date_empty_store() {
        let store = TransactionStore::new();
        assert!(store.is_empty());
        assert!(matches!(
            store.on_date(date("2025-01-01")).unwrap_err(),
            LedgerError::DateNotFound(_)
        ));
    }
}
