//! Delete command handlers.

use crate::args::{DeleteAtArgs, DeleteMatchingArgs};
use crate::commands::{transactions, Out};
use crate::model::{Transaction, TransactionFactory};
use crate::{Config, Result};

/// Deletes the transaction at a 1-based position on a date, as shown by `fintrack day`.
///
/// # Errors
/// - `DateNotFound` if nothing was recorded on the date.
/// - `InvalidInput` if the position is out of range.
pub fn delete_at(config: Config, args: DeleteAtArgs) -> Result<Out<Transaction>> {
    let mut ledger = config.ledger()?;
    // fail before the backup when there is nothing to delete
    let _ = ledger.store().on_date(args.date())?;
    config.backup().copy_data_file()?;

    let removed = ledger.remove_at(args.date(), args.position())?;
    let message = format!(
        "Deleted {} of {} in '{}' on {}",
        removed.t_type(),
        removed.amount().grouped(),
        removed.category(),
        removed.date()
    );
    Ok(Out::new(message, removed))
}

/// Deletes every transaction whose type, category, amount, date and description all equal the
/// given values. The values are validated like the input of `add`.
///
/// # Errors
/// - `EmptyInput` or `InvalidInput` if a value is malformed.
/// - `TransactionNotFound` if nothing matches.
pub fn delete_matching(config: Config, args: DeleteMatchingArgs) -> Result<Out<usize>> {
    let criteria = TransactionFactory::new().create(
        args.t_type(),
        args.category(),
        args.amount(),
        args.date(),
        args.description(),
    )?;

    let mut ledger = config.ledger()?;
    // fail before the backup when nothing matches
    ledger.store().matching(&criteria)?;
    config.backup().copy_data_file()?;
    let count = ledger.remove(&criteria)?;

    let message = format!("Deleted {} on {}", transactions(count), criteria.date());
    Ok(Out::new(message, count))
}
