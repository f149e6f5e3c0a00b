//! Plain-text rendering of row tables and key/value lists.

use std::fmt::Display;
use std::io::{self, Write};

/// Column separator for [`Table`].
const GAP: &str = "  ";

/// Row-oriented table with left-aligned, auto-sized columns.
#[derive(Debug, Default, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let columns = std::iter::once(&self.headers)
            .chain(&self.rows)
            .map(Vec::len)
            .max()
            .unwrap_or(0);
        let mut widths = vec![0; columns];
        for line in std::iter::once(&self.headers).chain(&self.rows) {
            for (i, cell) in line.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
        widths
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();
        for line in std::iter::once(&self.headers).chain(&self.rows) {
            let cells: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(i, w)| {
                    let cell = line.get(i).map(String::as_str).unwrap_or("");
                    format!("{:<w$}", cell, w = *w)
                })
                .collect();
            out.push_str(cells.join(GAP).trim_end());
            out.push('\n');
        }
        out
    }

    pub fn write_to(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(self.render().as_bytes())
    }
}

/// Ordered label/value pairs rendered with a shared label column.
#[derive(Debug, Default, Clone)]
pub struct Tabular {
    entries: Vec<(String, String)>,
}

impl Tabular {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_value(&mut self, label: impl Into<String>, value: impl Display) {
        self.entries.push((label.into(), value.to_string()));
    }

    /// Append `value` followed by `unit`, e.g. `61 °F`.
    pub fn add_value_unit(&mut self, label: impl Into<String>, value: impl Display, unit: &str) {
        let value = if unit.is_empty() {
            value.to_string()
        } else {
            format!("{} {}", value, unit)
        };
        self.entries.push((label.into(), value));
    }

    pub fn render(&self) -> String {
        let width = self
            .entries
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);
        let mut out = String::new();
        for (label, value) in &self.entries {
            let line = format!("{:<width$} {}", label, value, width = width);
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }

    pub fn write_to(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(self.render().as_bytes())
    }
}
