//! Table formatting for CLI list commands
//!
//! One small formatter shared by every list command instead of duplicated
//! layout code. Table output aligns columns and dims the header row; CSV
//! and JSON stay single-line per row for pipability.

use console::style;

use crate::cli::helpers::escape_csv;
use crate::cli::OutputFormat;

/// A simple column-aligned table
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<&'static str>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn row(&mut self, cells: Vec<String>) {
        debug_assert_eq!(cells.len(), self.headers.len());
        self.rows.push(cells);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Print in the requested format. `noun` feeds the summary line
    /// ("3 material(s)") shown for table output unless quieted.
    pub fn print(&self, format: OutputFormat, quiet: bool, noun: &str) {
        match format.resolve(None) {
            OutputFormat::Json => self.print_json(),
            OutputFormat::Csv => self.print_csv(),
            _ => {
                self.print_aligned();
                if !quiet {
                    println!();
                    println!("{} {}(s)", self.rows.len(), noun);
                }
            }
        }
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.len()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.len());
            }
        }
        widths
    }

    fn print_aligned(&self) {
        let widths = self.column_widths();

        let header_line = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| format!("{:<width$}", h, width = widths[i]))
            .collect::<Vec<_>>()
            .join("  ");
        println!("{}", style(header_line).dim());

        for row in &self.rows {
            let line = row
                .iter()
                .enumerate()
                .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
                .collect::<Vec<_>>()
                .join("  ");
            println!("{}", line.trim_end());
        }
    }

    fn print_csv(&self) {
        println!(
            "{}",
            self.headers
                .iter()
                .map(|h| h.to_lowercase())
                .collect::<Vec<_>>()
                .join(",")
        );
        for row in &self.rows {
            println!(
                "{}",
                row.iter()
                    .map(|c| escape_csv(c))
                    .collect::<Vec<_>>()
                    .join(",")
            );
        }
    }

    fn print_json(&self) {
        let objects: Vec<serde_json::Value> = self
            .rows
            .iter()
            .map(|row| {
                self.headers
                    .iter()
                    .zip(row)
                    .map(|(h, cell)| (h.to_lowercase(), serde_json::Value::String(cell.clone())))
                    .collect::<serde_json::Map<_, _>>()
                    .into()
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&objects).unwrap_or_else(|_| "[]".to_string())
        );
    }
}
