use crate::error::{LedgerError, LedgerResult};
use crate::model::Amount;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

/// The format used for dates everywhere: in the data file, on the command line and in output.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Whether a transaction brings money in or takes it out.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

serde_plain::derive_display_from_serialize!(TransactionType);
serde_plain::derive_fromstr_from_deserialize!(TransactionType);

/// One recorded income or expense event.
///
/// A `Transaction` can only be built through [`Transaction::new`] (or the
/// [`TransactionFactory`](crate::model::TransactionFactory), which parses raw text first), so a
/// value of this type always has a positive amount and a non-blank category. There are no setters;
/// an edit is a delete followed by a new insert.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Transaction {
    t_type: TransactionType,
    category: String,
    amount: Amount,
    #[serde(serialize_with = "serialize_date")]
    date: NaiveDate,
    description: String,
}

impl Transaction {
    /// Validates the already-typed fields and builds a transaction.
    ///
    /// # Errors
    /// - `EmptyInput` if `category` is blank.
    /// - `InvalidInput` if `amount` is zero or negative, has more than two decimal places or is
    ///   larger than [`Amount::MAX`].
    pub fn new(
        t_type: TransactionType,
        category: impl Into<String>,
        amount: Amount,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> LedgerResult<Self> {
        let category = category.into();
        if category.trim().is_empty() {
            return Err(LedgerError::empty_input("Category cannot be empty."));
        }
        check_amount(amount, &amount.value().to_string())?;
        Ok(Self {
            t_type,
            category,
            amount,
            date,
            description: description.into(),
        })
    }

    pub fn t_type(&self) -> TransactionType {
        self.t_type
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_income(&self) -> bool {
        self.t_type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.t_type == TransactionType::Expense
    }
}

/// The rules every transaction amount follows. `shown` is how the amount is quoted in the error.
pub(crate) fn check_amount(amount: Amount, shown: &str) -> LedgerResult<()> {
    if !amount.is_positive() {
        return Err(LedgerError::invalid_input(format!(
            "Amount is invalid - {shown}. It must be greater than zero."
        )));
    }
    if amount.decimal_places() > 2 {
        return Err(LedgerError::invalid_input(format!(
            "Amount is invalid - {shown}. It can have at most two decimal places."
        )));
    }
    if amount > Amount::MAX {
        return Err(LedgerError::invalid_input(format!(
            "Amount is invalid - {shown}. It cannot be more than {}.",
            Amount::MAX.grouped()
        )));
    }
    Ok(())
}

/// Parses a strict `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> LedgerResult<NaiveDate> {
    let trimmed = s.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        // chrono accepts unpadded fields such as 2025-9-1; the data file never contains those
        .ok()
        .filter(|d| d.format(DATE_FORMAT).to_string() == trimmed)
        .ok_or_else(|| {
            LedgerError::invalid_input(format!(
                "Date is invalid - {trimmed}. It must be in YYYY-MM-DD format."
            ))
        })
}

/// Writes a date in the `YYYY-MM-DD` form.
fn serialize_date<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&date.format(DATE_FORMAT))
}
