//! Error types for the ledger.
//!
//! Application plumbing (file I/O, configuration, commands) uses `anyhow::Error` with context.
//! Domain failures are `LedgerError` values; they travel inside `anyhow::Error` when they cross
//! into the plumbing and can be recovered with `downcast_ref::<LedgerError>()`.

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Result type for operations that can only fail with a `LedgerError`.
pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

/// The failures that the ledger reports back to the user.
///
/// None of these are fatal to the process. Each one aborts the single requested operation and the
/// message is meant to be shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// A required field was left blank.
    #[error("{0}")]
    EmptyInput(String),

    /// A transaction type, amount, date or position was malformed.
    #[error("{0}")]
    InvalidInput(String),

    /// Deletion criteria did not match any transaction.
    #[error("{0}")]
    TransactionNotFound(String),

    /// A category lookup produced no transactions.
    #[error("{0}")]
    CategoryNotFound(String),

    /// A date lookup produced no transactions, or the range was inverted.
    #[error("{0}")]
    DateNotFound(String),

    /// The data file exists but does not describe a valid ledger.
    #[error("Unable to read the ledger data: {0}")]
    Deserialization(String),
}

impl LedgerError {
    /// A stable name for the error variant, used as the `kind` field of the exit log event.
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerError::EmptyInput(_) => "empty_input",
            LedgerError::InvalidInput(_) => "invalid_input",
            LedgerError::TransactionNotFound(_) => "transaction_not_found",
            LedgerError::CategoryNotFound(_) => "category_not_found",
            LedgerError::DateNotFound(_) => "date_not_found",
            LedgerError::Deserialization(_) => "deserialization",
        }
    }

    pub(crate) fn empty_input(message: impl Into<String>) -> Self {
        Self::EmptyInput(message.into())
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub(crate) fn transaction_not_found(message: impl Into<String>) -> Self {
        Self::TransactionNotFound(message.into())
    }

    pub(crate) fn category_not_found(message: impl Into<String>) -> Self {
        Self::CategoryNotFound(message.into())
    }

    pub(crate) fn date_not_found(message: impl Into<String>) -> Self {
        Self::DateNotFound(message.into())
    }

    pub(crate) fn deserialization(message: impl Into<String>) -> Self {
        Self::Deserialization(message.into())
    }

}

/// Finds a `LedgerError` anywhere in the chain of an `anyhow::Error`.
pub fn ledger_error(e: &Error) -> Option<&LedgerError> {
    e.chain().find_map(|cause| cause.downcast_ref::<LedgerError>())
}

/// Logs the error that ends the process. A `LedgerError` in the chain adds its `kind`.
///
/// Errors are only logged here, once. Code that builds a `LedgerError` and then discards or
/// remaps it leaves nothing behind in the log.
pub fn report(e: &Error) {
    match ledger_error(e) {
        Some(le) => tracing::error!(kind = le.kind(), "Exiting with error: {e:#}"),
        None => tracing::error!("Exiting with error: {e:#}"),
    }
}
