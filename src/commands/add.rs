use crate::args::AddArgs;
use crate::commands::Out;
use crate::model::{Transaction, TransactionFactory};
use crate::{Config, Result};

/// Validates the raw values in `args`, records the new transaction and saves the ledger.
///
/// Nothing is written if any value is invalid. The data file is backed up before it is changed.
pub fn add(config: Config, args: AddArgs) -> Result<Out<Transaction>> {
    let transaction = TransactionFactory::new().create(
        args.t_type(),
        args.category(),
        args.amount(),
        args.date(),
        args.description(),
    )?;

    let mut ledger = config.ledger()?;
    config.backup().copy_data_file()?;
    ledger.add(transaction.clone())?;

    let message = format!(
        "Added {} of {} in '{}' on {}",
        transaction.t_type(),
        transaction.amount().grouped(),
        transaction.category(),
        transaction.date()
    );
    Ok(Out::new(message, transaction))
}
