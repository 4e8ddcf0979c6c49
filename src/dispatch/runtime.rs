// src/dispatch/runtime.rs

use std::fmt;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::dispatch::core::DispatchCore;
use crate::dispatch::{DispatchOptions, OutcomeRecord, OutcomeStatus};
use crate::exec::Launcher;
use crate::report::{Reporter, RunSummary};
use crate::source::WorkItem;

/// Drives a [`DispatchCore`]: launches items through a `Launcher`, polls
/// the active set, and streams outcomes to a `Reporter`.
///
/// All state is owned by the single task running [`Dispatcher::run`]; no
/// locking is involved. Parallelism comes from the external processes.
pub struct Dispatcher<L: Launcher, R: Reporter> {
    core: DispatchCore<L::Handle>,
    launcher: L,
    reporter: R,
    poll_interval: Duration,
    summary: RunSummary,
}

impl<L: Launcher, R: Reporter> fmt::Debug for Dispatcher<L, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("limit", &self.core.limit())
            .field("pending", &self.core.pending_len())
            .field("active", &self.core.active_len())
            .field("poll_interval", &self.poll_interval)
            .finish_non_exhaustive()
    }
}

impl<L: Launcher, R: Reporter> Dispatcher<L, R> {
    pub fn new(items: Vec<WorkItem>, options: DispatchOptions, launcher: L, reporter: R) -> Self {
        Self {
            core: DispatchCore::new(items, options.limit),
            launcher,
            reporter,
            poll_interval: options.poll_interval,
            summary: RunSummary::default(),
        }
    }

    /// Run the batch to completion.
    ///
    /// Individual failures never stop the loop; the returned summary counts
    /// them.
    pub async fn run(mut self) -> RunSummary {
        if self.core.is_finished() {
            info!("no work items; nothing to do");
            self.reporter.nothing_to_do();
            return self.summary;
        }

        info!(
            items = self.core.pending_len(),
            limit = self.core.limit(),
            "dispatch started"
        );

        loop {
            self.fill_slots().await;

            let finished = self.core.poll_active();
            let completed = finished.len();
            for outcome in finished {
                self.record(outcome);
            }

            if self.core.is_finished() {
                break;
            }

            if self.core.should_pause(completed) {
                tokio::time::sleep(self.poll_interval).await;
            }
        }

        info!(
            launched = self.summary.launched,
            succeeded = self.summary.succeeded,
            failed = self.summary.failed,
            high_water = self.core.high_water(),
            "dispatch finished"
        );
        self.reporter.summary(&self.summary);
        self.summary
    }

    /// Start pending items until every slot is taken or none are left.
    ///
    /// The active set is not polled while a launch is awaited, so a slow
    /// launch (the TIFF geometry probe) delays noticing other completions by
    /// at most its own duration.
    async fn fill_slots(&mut self) {
        while let Some(item) = self.core.next_to_launch() {
            match self.launcher.launch(&item).await {
                Ok(handle) => {
                    self.reporter.launched(&item);
                    self.core.admit(item, handle);
                }
                Err(err) => {
                    warn!(item = %item.id, error = %err, "starting conversion failed");
                    let outcome = OutcomeRecord::new(
                        &item,
                        OutcomeStatus::LaunchFailed(err.to_string()),
                        Duration::ZERO,
                    );
                    self.record(outcome);
                }
            }
        }
    }

    fn record(&mut self, outcome: OutcomeRecord) {
        debug!(item = %outcome.id, status = ?outcome.status, "item completed");
        self.summary.record(&outcome.status);
        self.reporter.finished(&outcome);
    }
}
