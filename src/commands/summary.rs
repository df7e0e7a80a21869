use crate::args::SummaryArgs;
use crate::commands::Out;
use crate::query::Summary;
use crate::{render, Config, Result};
use tracing::debug;

/// Reports total income, total expense and the balance.
///
/// Without `--from` or `--to` the figures cover the whole ledger, so the balance is the current
/// balance, and an empty ledger reports zeros. With a range, only that range is counted and an
/// inverted or empty range is a `DateNotFound` error.
pub fn summary(config: Config, args: SummaryArgs) -> Result<Out<Summary>> {
    let ledger = config.ledger()?;
    let store = ledger.store();

    let (heading, summary) = if args.has_range() {
        let in_range = store.by_date_range(args.from(), args.to())?;
        let from = args
            .from()
            .map(|d| d.to_string())
            .unwrap_or_else(|| "the beginning".to_string());
        let to = args
            .to()
            .map(|d| d.to_string())
            .unwrap_or_else(|| "today".to_string());
        (format!("From {from} to {to}"), Summary::of(in_range))
    } else {
        ("All time".to_string(), Summary::of(store.all()))
    };
    debug!("{heading}: {summary:?}");

    Ok(Out::new(
        format!("{heading}\n{}", render::summary(&summary)),
        summary,
    ))
}
