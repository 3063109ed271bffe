//! Sequential execution of report steps.
//!
//! The runner owns the database client for the whole run. Steps are
//! executed one at a time; closing consumes the runner, so no step can run
//! against a closed connection.

use std::io::Write;

use tracing::{debug, info, warn};

use super::{render_report, Step, StepOutcome, StepReport};
use crate::db::DatabaseClient;
use crate::error::{ReportError, Result};
use crate::safety::classify_sql;

/// Counts of succeeded and failed steps for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    /// Total number of steps attempted.
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Runs report steps over a single open connection.
pub struct ReportRunner {
    db: Box<dyn DatabaseClient>,
}

impl ReportRunner {
    /// Creates a runner over an open client.
    pub fn new(db: Box<dyn DatabaseClient>) -> Self {
        Self { db }
    }

    /// Executes one step and returns its outcome. Never fails as a whole.
    pub async fn execute<'s>(&mut self, step: &'s Step) -> StepReport<'s> {
        let outcome = match self.try_execute(step).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Step '{}' failed: {}", step.label, e);
                StepOutcome::Failed(e)
            }
        };
        StepReport { step, outcome }
    }

    async fn try_execute(&mut self, step: &Step) -> Result<StepOutcome> {
        let classification = classify_sql(step.sql);
        if !classification.is_read_only() {
            return Err(ReportError::query(classification.refusal_reason()));
        }

        let result = self.db.execute_query(step.sql).await?;
        debug!(
            "Step '{}' returned {} rows in {:?}",
            step.label, result.row_count, result.execution_time
        );

        if result.is_empty() && step.empty_warning.is_some() {
            warn!("Step '{}' returned no rows", step.label);
        }

        Ok(StepOutcome::Rows(step.post_process(result)))
    }

    /// Executes every step in order, writing each result to `out` as soon as
    /// it is available.
    ///
    /// Step failures are rendered and counted; only a write failure on `out`
    /// stops the run early.
    pub async fn run<W: Write>(&mut self, steps: &[Step], out: &mut W) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for step in steps {
            let report = self.execute(step).await;
            if report.outcome.is_failure() {
                summary.failed += 1;
            } else {
                summary.succeeded += 1;
            }

            render_report(&report, out)
                .and_then(|_| out.flush())
                .map_err(|e| ReportError::internal(format!("Failed to write report: {e}")))?;
        }

        info!(
            "Report finished: {} of {} steps succeeded",
            summary.succeeded,
            summary.total()
        );
        Ok(summary)
    }

    /// Closes the connection. Consumes the runner.
    pub async fn close(mut self) -> Result<()> {
        self.db.close().await
    }
}
