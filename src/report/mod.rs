//! Report steps and the runner that executes them.
//!
//! A report is a fixed list of [`Step`]s run in order over one connection.
//! Each step produces a [`StepOutcome`]; a failed step never stops the run.

mod render;
mod runner;
mod steps;

pub use render::{render_report, write_diagnostic, Banner, ResultTable};
pub use runner::{ReportRunner, RunSummary};
pub use steps::{sales_report, NULL_FALLBACK};

use crate::db::QueryResult;
use crate::error::ReportError;

/// A NULL substitution applied to one result column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fallback {
    /// Column to coalesce.
    pub column: &'static str,
    /// Text shown instead of NULL.
    pub value: &'static str,
}

impl Fallback {
    pub const fn new(column: &'static str, value: &'static str) -> Self {
        Self { column, value }
    }
}

/// One independent query-and-print unit of a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Label printed in the header and footer banners.
    pub label: &'static str,
    /// The read-only SQL to execute.
    pub sql: &'static str,
    /// Banner style framing the result.
    pub banner: Banner,
    /// NULL substitutions applied before rendering.
    pub fallbacks: &'static [Fallback],
    /// Warning printed when the query returns no rows.
    pub empty_warning: Option<&'static str>,
    /// What the step was doing, for the diagnostic line on failure.
    pub failure_context: &'static str,
}

impl Step {
    /// Applies the step's fallbacks to a fresh result.
    pub fn post_process(&self, mut result: QueryResult) -> QueryResult {
        for fallback in self.fallbacks {
            result.coalesce_column(fallback.column, fallback.value);
        }
        result
    }

    /// Formats the diagnostic line printed when the step fails.
    pub fn failure_message(&self, error: &ReportError) -> String {
        format!("Error {}: {}", self.failure_context, error)
    }
}

/// What a single step produced.
#[derive(Debug)]
pub enum StepOutcome {
    /// The query ran; rows are already post-processed.
    Rows(QueryResult),
    /// The query failed or was refused.
    Failed(ReportError),
}

impl StepOutcome {
    /// Returns true if the step failed.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// A step paired with its outcome, ready to render.
#[derive(Debug)]
pub struct StepReport<'a> {
    pub step: &'a Step,
    pub outcome: StepOutcome,
}
