// File:    table.rs
// Author:  apezoo
// Date:    2025-08-13
//
// Description: Renders diagnostic traces as fixed-width text tables.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Fixed-width rendering of a cipher trace.
//!
//! ```text
//! Encryption Table - ShiftCipher(1)(ab):
//! -----------------------
//! |    i    |  0  |  1  |
//! -----------------------
//! |input    |    ab     |
//! -----------------------
//! |encrypt  |  1  |  2  |
//! -----------------------
//! |output   |    bc     |
//! -----------------------
//! ```
//!
//! Each row gets one cell per value. A row holding a single value spans all
//! columns. Pass-through symbols render as blank cells.

use crate::alphabet::Symbol;
use crate::pipeline::{Row, Value};

/// The recorded rows of one run, with its title and final output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    /// Heading printed above the table.
    pub title: String,
    /// Rows in the order the stages produced them.
    pub rows: Vec<Row>,
    /// The text the run produced.
    pub output: String,
}

impl Trace {
    /// Renders the trace with cells `cell_width` characters wide.
    #[must_use]
    pub fn render(&self, cell_width: usize) -> String {
        render(&self.title, &self.rows, cell_width)
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Symbol(Symbol::Other(_)) => String::new(),
        other => other.to_string(),
    }
}

/// Renders `rows` under `title`.
#[must_use]
pub fn render(title: &str, rows: &[Row], cell_width: usize) -> String {
    let name_width = rows
        .iter()
        .map(|row| row.name.chars().count())
        .chain(std::iter::once(1))
        .max()
        .unwrap_or(1)
        + 2;
    let columns = rows.iter().map(|row| row.cells.len()).max().unwrap_or(0).max(1);
    let span = columns * (cell_width + 1) - 1;
    let line = "-".repeat(name_width + 2 + span + 1);

    let header: Vec<String> = (0..columns).map(|i| format!("{i:^cell_width$}")).collect();
    let mut lines = vec![
        title.to_owned(),
        line.clone(),
        format!("|{:^name_width$}|{}|", "i", header.join("|")),
    ];

    for row in rows {
        let cells = match row.cells.as_slice() {
            [single] => format!("{:^span$}", cell_text(single)),
            cells => {
                let mut padded: Vec<String> = cells
                    .iter()
                    .map(|cell| format!("{:^cell_width$}", cell_text(cell)))
                    .collect();
                padded.resize(columns, " ".repeat(cell_width));
                padded.join("|")
            }
        };
        lines.push(line.clone());
        lines.push(format!("|{:<name_width$}|{cells}|", row.name));
    }
    lines.push(line);
    lines.push(String::new());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_indexes_every_column() {
        let rows = vec![Row::groups("encrypt", &[Value::Number(1), Value::Number(22)])];
        let table = render("T:", &rows, 4);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "T:");
        assert_eq!(lines[2], "|    i    | 0  | 1  |");
        assert_eq!(lines[4], "|encrypt  | 1  | 22 |");
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[1].len(), lines[2].len());
    }

    #[test]
    fn test_single_value_spans_row() {
        let rows = vec![
            Row::scalar("input", Value::Text("ab".into())),
            Row::groups("encrypt", &[Value::Number(1), Value::Number(2)]),
        ];
        let table = render("T:", &rows, 3);
        assert!(table.contains("|input    |  ab   |\n"));
        assert!(table.contains("|encrypt  | 1 | 2 |\n"));
    }

    #[test]
    fn test_sentinel_renders_blank() {
        let rows = vec![Row::groups(
            "numeric",
            &[Value::Symbols(vec![Symbol::Letter(7), Symbol::Other(' ')])],
        )];
        let table = render("T:", &rows, 3);
        assert!(table.contains("|numeric  | 7 |   |\n"));
    }

    #[test]
    fn test_short_rows_are_padded() {
        let rows = vec![
            Row::groups("a", &[Value::Number(1), Value::Number(2), Value::Number(3)]),
            Row::groups("b", &[Value::Number(4), Value::Number(5)]),
        ];
        let table = render("T:", &rows, 3);
        assert!(table.contains("|b  | 4 | 5 |   |\n"));
    }
}
