//! Plain-text rendering of report steps.
//!
//! Renders query results as box-drawn tables with column headers and
//! auto-sized columns, framed by dashed banners.

use std::io::{self, Write};

use super::{StepOutcome, StepReport};
use crate::db::{QueryResult, Value};

/// Maximum width for any column.
const MAX_COLUMN_WIDTH: usize = 40;

/// Minimum width for any column.
const MIN_COLUMN_WIDTH: usize = 4;

/// Dashes on each side of a section label.
const SECTION_PADDING: usize = 10;

/// Header and footer style for a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    /// `----------Label----------`, closed by an equal-length dash rule.
    Section,
    /// Label centered in dashes to `width`, closed by `End Label` centered
    /// to the same width.
    Framed { width: usize },
}

impl Banner {
    /// Returns the header line for `label`.
    pub fn header(&self, label: &str) -> String {
        match self {
            Self::Section => {
                let pad = "-".repeat(SECTION_PADDING);
                format!("{pad}{label}{pad}")
            }
            Self::Framed { width } => center_in_dashes(label, *width),
        }
    }

    /// Returns the footer line for `label`.
    pub fn footer(&self, label: &str) -> String {
        match self {
            Self::Section => "-".repeat(self.header(label).chars().count()),
            Self::Framed { width } => center_in_dashes(&format!("End {label}"), *width),
        }
    }
}

/// Centers `text` in a run of dashes. Extra dashes go to the right.
fn center_in_dashes(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let fill = width.saturating_sub(len);
    let left = fill / 2;
    format!("{}{}{}", "-".repeat(left), text, "-".repeat(fill - left))
}

/// Text table for a query result.
pub struct ResultTable<'a> {
    result: &'a QueryResult,
}

impl<'a> ResultTable<'a> {
    /// Creates a new result table.
    pub fn new(result: &'a QueryResult) -> Self {
        Self { result }
    }

    /// Calculates the width of each column from its header and cells.
    fn calculate_column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .result
            .columns
            .iter()
            .map(|col| col.name.chars().count().max(MIN_COLUMN_WIDTH))
            .collect();

        for row in &self.result.rows {
            for (width, value) in widths.iter_mut().zip(row) {
                *width = (*width).max(value.to_string().chars().count());
            }
        }

        widths.iter().map(|&w| w.min(MAX_COLUMN_WIDTH)).collect()
    }

    /// Truncates a string to fit within the given width, adding ellipsis if needed.
    fn truncate(s: &str, max_width: usize) -> String {
        if s.chars().count() <= max_width {
            s.to_string()
        } else if max_width <= 3 {
            s.chars().take(max_width).collect()
        } else {
            let kept: String = s.chars().take(max_width - 3).collect();
            format!("{kept}...")
        }
    }

    /// Renders the table to lines, ending with a row-count line.
    pub fn render_to_lines(&self) -> Vec<String> {
        if self.result.columns.is_empty() {
            return vec!["(empty result)".to_string()];
        }

        let widths = self.calculate_column_widths();
        let headers: Vec<String> = self.result.columns.iter().map(|c| c.name.clone()).collect();

        let mut lines = Vec::with_capacity(self.result.rows.len() + 5);
        lines.push(render_border(&widths, '┌', '┬', '┐'));
        lines.push(render_cells(&headers, &widths));
        lines.push(render_border(&widths, '├', '┼', '┤'));
        for row in &self.result.rows {
            let cells: Vec<String> = row.iter().map(Value::to_string).collect();
            lines.push(render_cells(&cells, &widths));
        }
        lines.push(render_border(&widths, '└', '┴', '┘'));

        let count = self.result.row_count;
        lines.push(format!(
            "{} row{} returned",
            count,
            if count == 1 { "" } else { "s" }
        ));

        lines
    }
}

/// Renders a horizontal border line.
fn render_border(widths: &[usize], left: char, mid: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|&w| "─".repeat(w + 2)).collect();
    format!("{left}{}{right}", segments.join(mid.to_string().as_str()))
}

/// Renders one line of padded, truncated cells.
fn render_cells(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, &width)| {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let truncated = ResultTable::truncate(cell, width);
            format!(" {:width$} ", truncated, width = width)
        })
        .collect();
    format!("│{}│", padded.join("│"))
}

/// Writes a one-line diagnostic, ignoring write errors.
///
/// Used for lines printed outside a run, where stdout may already be gone.
pub fn write_diagnostic<W: Write>(out: &mut W, line: &str) {
    let _ = writeln!(out, "{line}").and_then(|_| out.flush());
}

/// Writes one step's output: warning, banners and table, or the failure line.
pub fn render_report<W: Write>(report: &StepReport<'_>, out: &mut W) -> io::Result<()> {
    let step = report.step;

    match &report.outcome {
        StepOutcome::Failed(error) => writeln!(out, "{}", step.failure_message(error)),
        StepOutcome::Rows(result) => {
            if let (true, Some(warning)) = (result.is_empty(), step.empty_warning) {
                writeln!(out, "{warning}")?;
            }

            writeln!(out)?;
            writeln!(out, "{}", step.banner.header(step.label))?;
            for line in ResultTable::new(result).render_to_lines() {
                writeln!(out, "{line}")?;
            }
            writeln!(out, "{}", step.banner.footer(step.label))
        }
    }
}
