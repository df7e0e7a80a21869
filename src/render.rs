//! Plain-text tables for showing transactions on the terminal.

use crate::model::Transaction;
use crate::query::Summary;

const HEADERS: [&str; 4] = ["TYPE", "CATEGORY", "AMOUNT", "DESCRIPTION"];

/// Renders one table per date. `transactions` must already be ordered by date, which is how every
/// store lookup yields them.
pub(crate) fn by_date<'a, I>(transactions: I) -> String
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let rows: Vec<&Transaction> = transactions.into_iter().collect();
    rows.chunk_by(|a, b| a.date() == b.date())
        .map(|group| format!("{}\n{}", group[0].date(), table(group, false)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Renders the transactions of a single date with their 1-based positions.
pub(crate) fn numbered(transactions: &[Transaction]) -> String {
    let rows: Vec<&Transaction> = transactions.iter().collect();
    table(&rows, true)
}

pub(crate) fn summary(summary: &Summary) -> String {
    let lines = [
        ("Income", summary.income().grouped()),
        ("Expense", summary.expense().grouped()),
        ("Balance", summary.balance().grouped()),
    ];
    let width = lines.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
    lines
        .iter()
        .map(|(label, value)| format!("{:<9}{value:>width$}", format!("{label}:")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn table(transactions: &[&Transaction], numbered: bool) -> String {
    let rows: Vec<[String; 4]> = transactions
        .iter()
        .map(|t| {
            [
                t.t_type().to_string(),
                t.category().to_string(),
                t.amount().grouped(),
                t.description().to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let pos_width = rows.len().to_string().len();

    let line = |pos: &str, cells: [&str; 4]| {
        let prefix = if numbered {
            format!("{pos:>pos_width$}  ")
        } else {
            String::new()
        };
        let text = format!(
            "{prefix}{:<w0$}  {:<w1$}  {:>w2$}  {}",
            cells[0],
            cells[1],
            cells[2],
            cells[3],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
        );
        text.trim_end().to_string()
    };

    let mut out = vec![line("#", HEADERS)];
    for (i, row) in rows.iter().enumerate() {
        let cells = [
            row[0].as_str(),
            row[1].as_str(),
            row[2].as_str(),
            row[3].as_str(),
        ];
        out.push(line(&(i + 1).to_string(), cells));
    }
    out.join("\n")
}
