//! Filters and aggregates over sequences of transactions.
//!
//! Everything here takes any iterator of `&Transaction`, so it composes with the lookups on
//! [`TransactionStore`](crate::TransactionStore) regardless of where the sequence came from.
//! Aggregates never fail: an empty input has a total of zero. "Nothing found" errors belong to
//! the lookups that produce the input.

use crate::error::{LedgerError, LedgerResult};
use crate::model::{Amount, Transaction, TransactionType};
use serde::Serialize;

/// Sums the amounts of the transactions of type `t_type`.
pub fn total<'a, I>(transactions: I, t_type: TransactionType) -> Amount
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|t| t.t_type() == t_type)
        .map(Transaction::amount)
        .sum()
}

/// Total income minus total expense. May be negative.
pub fn balance<'a, I>(transactions: I) -> Amount
where
    I: IntoIterator<Item = &'a Transaction>,
{
    Summary::of(transactions).balance()
}

/// Keeps only the transactions of type `t_type`.
pub fn of_type<'a, I>(
    transactions: I,
    t_type: TransactionType,
) -> impl Iterator<Item = &'a Transaction> + Clone + 'a
where
    I: Iterator<Item = &'a Transaction> + Clone + 'a,
{
    transactions.filter(move |t| t.t_type() == t_type)
}

/// Keeps only the transactions whose category is exactly `category`.
///
/// # Errors
/// - `CategoryNotFound` if nothing is left after filtering.
pub fn with_category<'a, I>(
    transactions: I,
    category: &'a str,
) -> LedgerResult<impl Iterator<Item = &'a Transaction> + Clone + 'a>
where
    I: Iterator<Item = &'a Transaction> + Clone + 'a,
{
    let filtered = transactions.filter(move |t| t.category() == category);
    if filtered.clone().next().is_none() {
        return Err(LedgerError::category_not_found(format!(
            "No transactions recorded in the '{category}' category."
        )));
    }
    Ok(filtered)
}

/// Income, expense and balance of a set of transactions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    income: Amount,
    expense: Amount,
    balance: Amount,
}

impl Summary {
    /// Computes the summary in a single pass.
    pub fn of<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let (income, expense) = transactions.into_iter().fold(
            (Amount::ZERO, Amount::ZERO),
            |(income, expense), t| match t.t_type() {
                TransactionType::Income => (income + t.amount(), expense),
                TransactionType::Expense => (income, expense + t.amount()),
            },
        );
        Self {
            income,
            expense,
            balance: income - expense,
        }
    }

    pub fn income(&self) -> Amount {
        self.income
    }

    pub fn expense(&self) -> Amount {
        self.expense
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// The total for one transaction type.
    pub fn total(&self, t_type: TransactionType) -> Amount {
        match t_type {
            TransactionType::Income => self.income,
            TransactionType::Expense => self.expense,
        }
    }
}
