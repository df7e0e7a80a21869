//! Types that represent the core data model, such as `Transaction` and `Amount`.
mod amount;
mod factory;
mod transaction;

pub use amount::{Amount, AmountError};
pub use factory::{parse_amount, parse_type, TransactionFactory};
pub use transaction::{parse_date, Transaction, TransactionType, DATE_FORMAT};
