//! Read-only commands that show transactions.

use crate::args::{DayArgs, ListArgs};
use crate::commands::{transactions, Out};
use crate::error::LedgerError;
use crate::model::Transaction;
use crate::query::{self, Summary};
use crate::{render, Config, Result};

/// Lists transactions, narrowed by the filters in `args`.
///
/// - With `--from` and/or `--to`, only that date range is listed. An inverted or empty range is a
///   `DateNotFound` error.
/// - With `--category`, only that category is listed, and it is a `CategoryNotFound` error if
///   nothing in the selection has the category.
/// - With `--type`, only income or only expense is listed.
/// - Without any filter, everything is listed, and an empty ledger is a `TransactionNotFound`
///   error.
///
/// The message holds one table per date followed by the totals of what was listed.
pub fn list(config: Config, args: ListArgs) -> Result<Out<Vec<Transaction>>> {
    let ledger = config.ledger()?;
    let store = ledger.store();

    let selected: Vec<&Transaction> = if args.has_range() {
        let in_range = store.by_date_range(args.from(), args.to())?;
        filter(in_range, &args)?
    } else {
        if store.is_empty() {
            return Err(LedgerError::transaction_not_found("No transactions recorded.").into());
        }
        filter(store.all(), &args)?
    };

    if selected.is_empty() {
        return Ok(Out::new("No transactions match.", Vec::new()));
    }

    let summary = Summary::of(selected.iter().copied());
    let message = format!(
        "{}\n\n{} listed\n{}",
        render::by_date(selected.iter().copied()),
        transactions(selected.len()),
        render::summary(&summary)
    );
    Ok(Out::new(
        message,
        selected.into_iter().cloned().collect::<Vec<_>>(),
    ))
}

fn filter<'a, I>(transactions: I, args: &'a ListArgs) -> Result<Vec<&'a Transaction>>
where
    I: Iterator<Item = &'a Transaction> + Clone + 'a,
{
    let selected = match (args.t_type(), args.category()) {
        (None, None) => transactions.collect(),
        (Some(t_type), None) => query::of_type(transactions, t_type).collect(),
        (None, Some(category)) => query::with_category(transactions, category)?.collect(),
        (Some(t_type), Some(category)) => {
            query::of_type(query::with_category(transactions, category)?, t_type).collect()
        }
    };
    Ok(selected)
}

/// Shows the transactions on one date, numbered from 1 for `delete at`.
///
/// # Errors
/// - `DateNotFound` if nothing was recorded on the date.
pub fn day(config: Config, args: DayArgs) -> Result<Out<Vec<Transaction>>> {
    let ledger = config.ledger()?;
    let on_date = ledger.store().on_date(args.date())?;
    let message = format!(
        "{}\n{}\n\n{}",
        args.date(),
        render::numbered(on_date),
        render::summary(&Summary::of(on_date))
    );
    Ok(Out::new(message, on_date.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ledger_error;
    use crate::model::{parse_date, TransactionType};
    use crate::test::{tx, TestEnv};

    fn seeded() -> TestEnv {
        let env = TestEnv::new();
        env.seed([
            tx("income", "salary", "20000", "2025-09-30", "September"),
            tx("expense", "rent", "1200", "2025-10-01", ""),
            tx("expense", "groceries", "45.5", "2025-10-01", "Market"),
            tx("income", "gift", "100", "2025-10-05", ""),
        ]);
        env
    }

    fn date(s: &str) -> Option<chrono::NaiveDate> {
        Some(parse_date(s).unwrap())
    }

    fn categories(out: &Out<Vec<Transaction>>) -> Vec<&str> {
        out.structure()
            .unwrap()
            .iter()
            .map(Transaction::category)
            .collect()
    }

    #[test]
    fn test_list_all() {
        let env = seeded();
        let out = list(env.config(), ListArgs::default()).unwrap();
        assert_eq!(categories(&out), ["salary", "rent", "groceries", "gift"]);
        assert!(out.message().contains("4 transactions listed"));
        assert!(out.message().contains("Balance: 18,854.50"));
    }

    #[test]
    fn test_list_empty_ledger() {
        let env = TestEnv::new();
        let e = list(env.config(), ListArgs::default()).unwrap_err();
        assert_eq!(
            ledger_error(&e),
            Some(&LedgerError::TransactionNotFound(
                "No transactions recorded.".into()
            ))
        );
    }

    #[test]
    fn test_list_range() {
        let env = seeded();
        let args = ListArgs::new(date("2025-10-01"), date("2025-10-04"), None, None);
        let out = list(env.config(), args).unwrap();
        assert_eq!(categories(&out), ["rent", "groceries"]);
    }

    #[test]
    fn test_list_inverted_range() {
        let env = seeded();
        let args = ListArgs::new(date("2025-10-05"), date("2025-10-01"), None, None);
        let e = list(env.config(), args).unwrap_err();
        assert!(matches!(ledger_error(&e), Some(LedgerError::DateNotFound(_))));
    }

    #[test]
    fn test_list_type_in_range() {
        let env = seeded();
        let args = ListArgs::new(
            date("2025-09-01"),
            date("2025-10-31"),
            Some(TransactionType::Income),
            None,
        );
        let out = list(env.config(), args).unwrap();
        assert_eq!(categories(&out), ["salary", "gift"]);
    }

    #[test]
    fn test_list_category() {
        let env = seeded();
        let args = ListArgs::new(None, None, None, Some("rent".into()));
        let out = list(env.config(), args).unwrap();
        assert_eq!(categories(&out), ["rent"]);

        // categories are case-sensitive
        let args = ListArgs::new(None, None, None, Some("Rent".into()));
        let e = list(env.config(), args).unwrap_err();
        assert!(matches!(ledger_error(&e), Some(LedgerError::CategoryNotFound(_))));
    }

    #[test]
    fn test_list_type_without_matches() {
        let env = TestEnv::new();
        env.seed([tx("expense", "rent", "1200", "2025-10-01", "")]);
        let args = ListArgs::new(None, None, Some(TransactionType::Income), None);
        let out = list(env.config(), args).unwrap();
        assert!(out.structure().unwrap().is_empty());
    }

    #[test]
    fn test_day() {
        let env = seeded();
        let out = day(env.config(), DayArgs::new(parse_date("2025-10-01").unwrap())).unwrap();
        assert_eq!(categories(&out), ["rent", "groceries"]);
        assert!(out.message().contains("1  expense  rent"));
        assert!(out.message().contains("2  expense  groceries"));
    }

    #[test]
    fn test_day_without_transactions() {
        let env = seeded();
        let e = day(env.config(), DayArgs::new(parse_date("2025-10-02").unwrap())).unwrap_err();
        assert!(matches!(ledger_error(&e), Some(LedgerError::DateNotFound(_))));
    }
}
