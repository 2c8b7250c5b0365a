//! Plain-text table of a run's records for the terminal.

use crate::models::EventRecords;
use itertools::Itertools;

const EMPTY_CELL: &str = "-";

/// Render records as a pipe-separated table with padded columns.
pub fn render(records: &EventRecords) -> String {
    let headers = records.headers();
    let rows: Vec<Vec<&str>> = records
        .rows()
        .into_iter()
        .map(|row| row.into_iter().map(|c| c.unwrap_or(EMPTY_CELL)).collect::<Vec<_>>())
        .collect();

    let widths: Vec<usize> = (0..headers.len())
        .map(|col| {
            rows.iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(headers[col].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let separator = widths.iter().map(|w| "-".repeat(*w)).join("-+-");

    std::iter::once(format_row(headers, &widths))
        .chain(std::iter::once(separator))
        .chain(rows.iter().map(|row| format_row(row, &widths)))
        .join("\n")
}

fn format_row(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .join(" | ")
        .trim_end()
        .to_string()
}
