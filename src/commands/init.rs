use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the fintrack home directory, its backups subdirectory and an initial `config.json`
/// with default settings. The data file itself is created by the first change to the ledger.
///
/// # Arguments
/// - `home` - The directory that will be the root of data directory, e.g. `$HOME/fintrack`
///
/// # Errors
/// - Returns an error if the directory has already been initialized.
/// - Returns an error if any file operations fail.
pub fn init(home: &Path) -> Result<Out<()>> {
    let config = Config::create(home).context("Unable to create the data directory and config")?;
    Ok(format!(
        "Successfully created the fintrack directory and config at {}",
        config.root().display()
    )
    .into())
}
