use clap::Parser;
use fintrack::args::{Args, Command, DeleteSubcommand};
use fintrack::{commands, report, Config, Result};
use std::process::ExitCode;
use tracing::{debug, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

pub fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().home().path();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init => commands::init(home)?.print(),

        Command::Add(add_args) => commands::add(Config::load(home)?, add_args.clone())?.print(),

        Command::List(list_args) => {
            commands::list(Config::load(home)?, list_args.clone())?.print()
        }

        Command::Day(day_args) => commands::day(Config::load(home)?, day_args.clone())?.print(),

        Command::Summary(summary_args) => {
            commands::summary(Config::load(home)?, summary_args.clone())?.print()
        }

        Command::Delete(delete_args) => {
            let config = Config::load(home)?;
            match delete_args.how() {
                DeleteSubcommand::At(args) => commands::delete_at(config, args.clone())?.print(),
                DeleteSubcommand::Matching(args) => {
                    commands::delete_matching(config, args.clone())?.print()
                }
            }
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
