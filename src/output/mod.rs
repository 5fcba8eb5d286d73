//
//  turso-cli
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! This module renders command results in one of two formats:
//!
//! - **Table format**: Human-readable output for interactive terminal use
//! - **JSON format**: Machine-readable output for scripting (`--json`)
//!
//! ## Architecture
//!
//! - [`table`]: Table formatting utilities using `comfy_table`
//! - [`json`]: JSON serialization utilities using `serde_json`
//!
//! ## Core Components
//!
//! - [`OutputFormat`]: The available output formats
//! - [`OutputWriter`]: Main entry point for writing formatted output
//! - [`TableOutput`]: Detail views rendered as `key: value` lines
//! - [`TableRow`]: List items rendered as rows of one table
//!
//! ## Example
//!
//! ```rust,ignore
//! use turso_cli::output::{OutputFormat, OutputWriter};
//!
//! let writer = OutputWriter::new(OutputFormat::Json);
//! writer.write_list(&groups)?;
//! writer.write_success("Group created");
//! ```

mod json;
mod table;

pub use json::*;
pub use table::*;

use serde::Serialize;

/// Represents the available output formats for CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable table format with optional color support.
    #[default]
    Table,
    /// Pretty-printed JSON for scripting and automation.
    Json,
}

impl OutputFormat {
    /// Picks the format from the global `--json` flag.
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Table
        }
    }
}

/// A unified output writer that handles both output formats.
///
/// Data goes to stdout. Warnings go to stderr so `--json` output
/// stays parseable.
///
/// # Notes
///
/// Color output is detected from terminal capabilities and disabled when
/// output is piped or redirected.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    /// Creates a writer for `format`.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    /// Creates a JSON writer.
    pub fn json() -> Self {
        Self::new(OutputFormat::Json)
    }

    /// Creates a table writer.
    pub fn table() -> Self {
        Self::new(OutputFormat::Table)
    }

    /// Returns the output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Returns `true` if writing JSON.
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Writes a single value.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(value)?,
            OutputFormat::Table => value.print_table(self.color),
        }
        Ok(())
    }

    /// Writes a list of values as one table, or as a JSON array.
    ///
    /// An empty list prints `No <noun> found` in table mode and `[]` in JSON mode.
    pub fn write_list<T: Serialize + TableRow>(&self, values: &[T], noun: &str) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(&values)?,
            OutputFormat::Table if values.is_empty() => println!("No {noun} found"),
            OutputFormat::Table => println!("{}", render_rows(values, self.color)),
        }
        Ok(())
    }

    /// Writes a warning message to stderr.
    pub fn write_warning(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {}", msg);
        }
    }

    /// Writes an informational message to stdout. Suppressed in JSON mode.
    pub fn write_info(&self, msg: &str) {
        if !self.is_json() {
            println!("{}", msg);
        }
    }

    /// Writes a success message. Suppressed in JSON mode.
    pub fn write_success(&self, msg: &str) {
        use console::style;
        if self.is_json() {
            return;
        }
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}

/// Types rendered as a detail view in table mode.
pub trait TableOutput {
    /// Prints the value to stdout.
    fn print_table(&self, color: bool);
}

/// Types rendered as one row of a table in table mode.
pub trait TableRow {
    /// Column headers, shared by every row.
    const HEADERS: &'static [&'static str];

    /// Cells of this row, in header order.
    fn row(&self, color: bool) -> Vec<String>;
}

/// Renders `values` as a table with [`TableRow::HEADERS`] as header.
pub fn render_rows<T: TableRow>(values: &[T], color: bool) -> String {
    TableBuilder::new()
        .color(color)
        .headers(T::HEADERS.iter().copied())
        .rows(values.iter().map(|v| v.row(color)))
        .build()
        .to_string()
}

/// Prints a bold header line followed by an underline.
pub fn print_header(text: &str) {
    use console::style;
    println!("{}", style(text).bold());
    println!("{}", "-".repeat(text.chars().count()));
}

/// Prints a `key: value` line, dimming the key when color is enabled.
pub fn print_field(key: &str, value: &str, color: bool) {
    use console::style;
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item(&'static str, bool);

    impl TableRow for Item {
        const HEADERS: &'static [&'static str] = &["NAME", "ACTIVE"];

        fn row(&self, color: bool) -> Vec<String> {
            vec![self.0.to_string(), format_bool(self.1, color)]
        }
    }

    #[test]
    fn test_output_format_from_flag() {
        assert_eq!(OutputFormat::from_json_flag(true), OutputFormat::Json);
        assert_eq!(OutputFormat::from_json_flag(false), OutputFormat::Table);
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }

    #[test]
    fn test_render_rows() {
        let rendered = render_rows(&[Item("meow", true), Item("woof", false)], false);
        assert!(rendered.contains("NAME"));
        assert!(rendered.contains("ACTIVE"));
        assert!(rendered.contains("meow"));
        assert!(rendered.contains("No"));
    }

    #[test]
    fn test_writer_format() {
        assert!(OutputWriter::json().is_json());
        assert_eq!(OutputWriter::table().format(), OutputFormat::Table);
    }
}
