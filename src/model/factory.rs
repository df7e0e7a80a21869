//! Turns raw user-entered text into validated `Transaction` values.

use crate::error::{LedgerError, LedgerResult};
use crate::model::transaction::{check_amount, parse_date};
use crate::model::{Amount, Transaction, TransactionType};
use chrono::{Local, NaiveDate};
use std::str::FromStr;
use tracing::debug;

/// Builds transactions from the strings a front-end collects from the user.
///
/// The factory only validates and constructs. Putting the result into a store is a separate step
/// performed by the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionFactory {
    /// The date used when no date is given. `None` means the local date at the time of the call.
    today: Option<NaiveDate>,
}

impl TransactionFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A factory whose notion of "today" is fixed, so that the blank-date default is predictable.
    pub fn with_today(today: NaiveDate) -> Self {
        Self { today: Some(today) }
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Validates each raw field and returns a new transaction.
    ///
    /// # Errors
    /// - `EmptyInput` when `t_type`, `category` or `amount` is blank.
    /// - `InvalidInput` when `t_type` is not `income` or `expense` (any case), when `amount` is not
    ///   a number greater than zero, or when `date` is not blank and not a `YYYY-MM-DD` date.
    pub fn create(
        &self,
        t_type: &str,
        category: &str,
        amount: &str,
        date: &str,
        description: &str,
    ) -> LedgerResult<Transaction> {
        let t_type = parse_type(t_type)?;

        let category = category.trim();
        if category.is_empty() {
            return Err(LedgerError::empty_input("Category cannot be empty."));
        }

        let amount = parse_amount(amount)?;

        let date = if date.trim().is_empty() {
            let today = self.today();
            debug!("No date given, using {today}");
            today
        } else {
            parse_date(date)?
        };

        Transaction::new(t_type, category, amount, date, description.trim())
    }
}

/// Parses `income` or `expense`, ignoring case and surrounding whitespace.
pub fn parse_type(s: &str) -> LedgerResult<TransactionType> {
    let normalized = s.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(LedgerError::empty_input("Transaction type cannot be empty."));
    }
    TransactionType::from_str(&normalized).map_err(|_| {
        LedgerError::invalid_input(format!(
            "Transaction type is invalid - {}. It must be income or expense.",
            s.trim()
        ))
    })
}

/// Parses a positive amount of at most two decimal places, no larger than [`Amount::MAX`].
pub fn parse_amount(s: &str) -> LedgerResult<Amount> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::empty_input("Amount cannot be empty."));
    }
    let amount = Amount::from_str(trimmed).map_err(|_| {
        LedgerError::invalid_input(format!("Amount is invalid - {trimmed}. It must be a number."))
    })?;
    check_amount(amount, trimmed)?;
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn factory() -> TransactionFactory {
        TransactionFactory::with_today(NaiveDate::from_ymd_opt(2025, 10, 19).unwrap())
    }

    #[test]
    fn test_create_normalizes_type() {
        let t = factory()
            .create(" INCOME ", "salary", "20000", "2025-09-30", "September")
            .unwrap();
        assert_eq!(t.t_type(), TransactionType::Income);
        assert_eq!(t.amount().value(), Decimal::from(20000));
        assert_eq!(t.description(), "September");
    }

    #[test]
    fn test_create_blank_date_is_today() {
        let t = factory().create("expense", "food", "4.50", "  ", "").unwrap();
        assert_eq!(t.date(), NaiveDate::from_ymd_opt(2025, 10, 19).unwrap());
    }

    #[test]
    fn test_create_invalid_type() {
        let err = factory().create("refund", "x", "1", "", "").unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput(_)));
        let err = factory().create("", "x", "1", "", "").unwrap_err();
        assert!(matches!(err, LedgerError::EmptyInput(_)));
    }

    #[test]
    fn test_create_empty_category() {
        let err = factory().create("income", " \t", "1", "", "").unwrap_err();
        assert_eq!(err, LedgerError::EmptyInput("Category cannot be empty.".into()));
    }

    #[test]
    fn test_create_bad_amounts() {
        for amount in [
            "abc",
            "0",
            "-5",
            "0.00",
            "12,5.x",
            "1234567.123456789012",
            "50000000000000000000000000000",
            "$1,000,000,000,000",
        ] {
            let err = factory().create("income", "x", amount, "", "").unwrap_err();
            assert!(
                matches!(err, LedgerError::InvalidInput(_)),
                "{amount} gave {err:?}"
            );
        }
        let err = factory().create("income", "x", "", "", "").unwrap_err();
        assert!(matches!(err, LedgerError::EmptyInput(_)));
    }

    #[test]
    fn test_create_bad_date() {
        for date in ["2025-13-01", "01/02/2025", "yesterday"] {
            let err = factory().create("income", "x", "1", date, "").unwrap_err();
            assert!(matches!(err, LedgerError::InvalidInput(_)), "{date}");
        }
    }

    #[test]
    fn test_description_may_be_empty() {
        let t = factory().create("income", "gift", "$1,000", "", "").unwrap();
        assert_eq!(t.description(), "");
        assert_eq!(t.amount().value(), Decimal::from(1000));
    }
}
