//! These structs provide the CLI interface for the fintrack CLI.

use crate::model::{parse_date, TransactionType};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// fintrack: A command-line ledger for personal income and expenses.
///
/// Record what comes in and what goes out, list it by date, category or type, and see your
/// totals and balance. Everything is kept in a single JSON file in the fintrack home directory,
/// which is rewritten after every change.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the fintrack home directory and its configuration file.
    ///
    /// This is the first command you should run. By default the home directory is
    /// $HOME/fintrack; pass --home or set FINTRACK_HOME to put it somewhere else.
    Init,
    /// Record a new income or expense.
    Add(AddArgs),
    /// List transactions, optionally filtered by date range, type and category.
    List(ListArgs),
    /// Show the transactions on one date, numbered for use with `delete at`.
    Day(DayArgs),
    /// Show total income, total expense and the balance.
    Summary(SummaryArgs),
    /// Delete transactions.
    Delete(DeleteArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where fintrack data and configuration is held. Defaults to ~/fintrack
    #[arg(long, env = "FINTRACK_HOME", default_value_t = default_fintrack_home())]
    home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, home: PathBuf) -> Self {
        Self {
            log_level,
            home: home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }
}

/// (Not shown): Args for the `fintrack add` command.
///
/// The values are taken as typed and validated together when the transaction is built.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// Either "income" or "expense" (any case).
    #[arg(long = "type")]
    t_type: String,

    /// The category, e.g. "salary" or "groceries". Categories are case-sensitive.
    #[arg(long)]
    category: String,

    /// The amount, greater than zero. A leading "$" and thousands separators are accepted.
    #[arg(long, allow_hyphen_values = true)]
    amount: String,

    /// The date as YYYY-MM-DD. Defaults to today.
    #[arg(long, default_value = "")]
    date: String,

    /// An optional free-text description.
    #[arg(long, default_value = "")]
    description: String,
}

impl AddArgs {
    pub fn new(
        t_type: impl Into<String>,
        category: impl Into<String>,
        amount: impl Into<String>,
        date: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            t_type: t_type.into(),
            category: category.into(),
            amount: amount.into(),
            date: date.into(),
            description: description.into(),
        }
    }

    pub fn t_type(&self) -> &str {
        &self.t_type
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// (Not shown): Args for the `fintrack list` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct ListArgs {
    /// The first date to include, YYYY-MM-DD. Defaults to the earliest transaction.
    #[arg(long, value_parser = parse_date)]
    from: Option<NaiveDate>,

    /// The last date to include, YYYY-MM-DD. Defaults to today when --from is given.
    #[arg(long, value_parser = parse_date)]
    to: Option<NaiveDate>,

    /// Only list "income" or "expense" transactions.
    #[arg(long = "type", value_enum, ignore_case = true)]
    t_type: Option<TransactionType>,

    /// Only list transactions in this category (case-sensitive).
    #[arg(long)]
    category: Option<String>,
}

impl ListArgs {
    pub fn new(
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        t_type: Option<TransactionType>,
        category: Option<String>,
    ) -> Self {
        Self {
            from,
            to,
            t_type,
            category,
        }
    }

    pub fn from(&self) -> Option<NaiveDate> {
        self.from
    }

    pub fn to(&self) -> Option<NaiveDate> {
        self.to
    }

    pub fn t_type(&self) -> Option<TransactionType> {
        self.t_type
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// True when a date range was requested.
    pub fn has_range(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }
}

/// (Not shown): Args for the `fintrack day` command.
#[derive(Debug, Parser, Clone)]
pub struct DayArgs {
    /// The date to show, YYYY-MM-DD.
    #[arg(long, value_parser = parse_date)]
    date: NaiveDate,
}

impl DayArgs {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// (Not shown): Args for the `fintrack summary` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct SummaryArgs {
    /// The first date to include, YYYY-MM-DD. Without --from or --to the summary covers
    /// everything recorded.
    #[arg(long, value_parser = parse_date)]
    from: Option<NaiveDate>,

    /// The last date to include, YYYY-MM-DD. Defaults to today when --from is given.
    #[arg(long, value_parser = parse_date)]
    to: Option<NaiveDate>,
}

impl SummaryArgs {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn from(&self) -> Option<NaiveDate> {
        self.from
    }

    pub fn to(&self) -> Option<NaiveDate> {
        self.to
    }

    pub fn has_range(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }
}

/// (Not shown): Args for the `fintrack delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    #[command(subcommand)]
    how: DeleteSubcommand,
}

impl DeleteArgs {
    pub fn new(how: DeleteSubcommand) -> Self {
        Self { how }
    }

    pub fn how(&self) -> &DeleteSubcommand {
        &self.how
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum DeleteSubcommand {
    /// Delete the transaction at a position on a date, as numbered by `fintrack day`.
    At(DeleteAtArgs),
    /// Delete every transaction whose fields all equal the ones given.
    Matching(DeleteMatchingArgs),
}

/// (Not shown): Args for the `fintrack delete at` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteAtArgs {
    /// The date of the transaction, YYYY-MM-DD.
    #[arg(long, value_parser = parse_date)]
    date: NaiveDate,

    /// The 1-based position of the transaction on that date.
    #[arg(long)]
    position: usize,
}

impl DeleteAtArgs {
    pub fn new(date: NaiveDate, position: usize) -> Self {
        Self { date, position }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

/// (Not shown): Args for the `fintrack delete matching` command.
///
/// The criteria are validated the same way as for `add`, so they always describe a transaction
/// that could exist.
#[derive(Debug, Parser, Clone)]
pub struct DeleteMatchingArgs {
    /// Either "income" or "expense" (any case).
    #[arg(long = "type")]
    t_type: String,

    /// The category (case-sensitive).
    #[arg(long)]
    category: String,

    /// The amount.
    #[arg(long, allow_hyphen_values = true)]
    amount: String,

    /// The date as YYYY-MM-DD.
    #[arg(long)]
    date: String,

    /// The description. Defaults to none.
    #[arg(long, default_value = "")]
    description: String,
}

impl DeleteMatchingArgs {
    pub fn new(
        t_type: impl Into<String>,
        category: impl Into<String>,
        amount: impl Into<String>,
        date: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            t_type: t_type.into(),
            category: category.into(),
            amount: amount.into(),
            date: date.into(),
            description: description.into(),
        }
    }

    pub fn t_type(&self) -> &str {
        &self.t_type
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

fn default_fintrack_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("fintrack"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --home or FINTRACK_HOME instead of relying on the default \
                fintrack home directory. If you continue using the program right now, you may \
                have problems!",
            );
            PathBuf::from("fintrack")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
