// src/report.rs

//! Per-item result reporting.
//!
//! The dispatcher hands every [`OutcomeRecord`] to a [`Reporter`] as soon as
//! it is observed. [`ConsoleReporter`] prints one line per item on stdout;
//! tests use a recording implementation instead.

use std::io::Write;

use tracing::{error, info, warn};

use crate::dispatch::{OutcomeRecord, OutcomeStatus};
use crate::source::WorkItem;

/// Aggregate counts for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Items whose process was started.
    pub launched: usize,
    pub succeeded: usize,
    /// Non-zero exits plus launch failures.
    pub failed: usize,
}

impl RunSummary {
    pub fn record(&mut self, status: &OutcomeStatus) {
        match status {
            OutcomeStatus::Success => {
                self.launched += 1;
                self.succeeded += 1;
            }
            OutcomeStatus::Failed(_) => {
                self.launched += 1;
                self.failed += 1;
            }
            OutcomeStatus::LaunchFailed(_) => self.failed += 1,
        }
    }

    /// Number of items that reached a terminal state.
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Sink for dispatch events.
pub trait Reporter: Send {
    /// An item's process was started.
    fn launched(&mut self, _item: &WorkItem) {}

    /// An item reached its terminal state.
    fn finished(&mut self, outcome: &OutcomeRecord);

    /// The batch had no items at all.
    fn nothing_to_do(&mut self) {}

    /// Called once after the last item finished.
    fn summary(&mut self, _summary: &RunSummary) {}
}

/// Line-oriented reporter for the terminal.
pub struct ConsoleReporter<W: Write + Send> {
    out: W,
    usage_hint: Option<String>,
}

impl<W: Write + Send> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            usage_hint: None,
        }
    }

    /// Extra text printed after "nothing to do".
    pub fn with_usage_hint(mut self, hint: impl Into<String>) -> Self {
        self.usage_hint = Some(hint.into());
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}") {
            warn!(error = %e, "failed to write report line");
        }
    }
}

impl<W: Write + Send> Reporter for ConsoleReporter<W> {
    fn launched(&mut self, item: &WorkItem) {
        info!(
            item = %item.id,
            "start processing \"{}\" as {}",
            item.title,
            item.output_name()
        );
    }

    fn finished(&mut self, outcome: &OutcomeRecord) {
        let text = format_outcome(outcome);
        match &outcome.status {
            OutcomeStatus::Success => {
                info!(item = %outcome.id, elapsed = ?outcome.elapsed, "finished");
            }
            OutcomeStatus::Failed(code) => {
                error!(item = %outcome.id, exit_code = code, "conversion failed");
            }
            OutcomeStatus::LaunchFailed(reason) => {
                error!(item = %outcome.id, reason = %reason, "conversion could not start");
            }
        }
        self.line(&text);
    }

    fn nothing_to_do(&mut self) {
        self.line("nothing to do");
        if let Some(hint) = self.usage_hint.take() {
            self.line(&hint);
        }
    }

    fn summary(&mut self, summary: &RunSummary) {
        if !summary.all_succeeded() {
            self.line(&format!(
                "{} of {} conversions failed",
                summary.failed,
                summary.total()
            ));
        }
        if let Err(e) = self.out.flush() {
            warn!(error = %e, "failed to flush report output");
        }
    }
}

/// The user-facing line for one outcome.
pub fn format_outcome(outcome: &OutcomeRecord) -> String {
    match &outcome.status {
        OutcomeStatus::Success => format!("finished {}", outcome.output_name()),
        OutcomeStatus::Failed(code) => format!(
            "conversion of {} failed, return code {}",
            outcome.input_name(),
            code
        ),
        OutcomeStatus::LaunchFailed(reason) => format!(
            "conversion of {} failed, could not start: {}",
            outcome.input_name(),
            reason
        ),
    }
}
