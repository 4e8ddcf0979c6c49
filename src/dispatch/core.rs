// src/dispatch/core.rs

//! Synchronous dispatch state.
//!
//! `DispatchCore` owns the pending queue and the active set. It never
//! sleeps or spawns anything: the async shell (`dispatch::runtime`) asks it
//! which item to start next, hands back the resulting process handle, and
//! asks it to poll the active set. This keeps the concurrency bound testable
//! with plain handles and no runtime.

use std::collections::VecDeque;

use tokio::time::Instant;
use tracing::{debug, warn};

use crate::dispatch::{OutcomeRecord, OutcomeStatus};
use crate::exec::ProcessHandle;
use crate::source::WorkItem;

/// A launched item and its process handle.
#[derive(Debug)]
pub struct RunningProcess<H> {
    pub item: WorkItem,
    pub handle: H,
    pub started: Instant,
}

#[derive(Debug)]
pub struct DispatchCore<H> {
    pending: VecDeque<WorkItem>,
    active: Vec<RunningProcess<H>>,
    limit: usize,
    high_water: usize,
    launched: usize,
}

impl<H: ProcessHandle> DispatchCore<H> {
    /// A limit of zero is raised to one so the batch can make progress.
    pub fn new(items: Vec<WorkItem>, limit: usize) -> Self {
        Self {
            pending: items.into(),
            active: Vec::new(),
            limit: limit.max(1),
            high_water: 0,
            launched: 0,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Largest active-set size seen so far.
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    /// Number of items handed to [`admit`](Self::admit).
    pub fn launched(&self) -> usize {
        self.launched
    }

    /// Nothing pending and nothing running.
    pub fn is_finished(&self) -> bool {
        self.pending.is_empty() && self.active.is_empty()
    }

    /// Pop the next pending item if a slot is free.
    ///
    /// The caller must either [`admit`](Self::admit) the item with its handle
    /// or report it as a launch failure.
    pub fn next_to_launch(&mut self) -> Option<WorkItem> {
        if self.active.len() >= self.limit {
            return None;
        }
        self.pending.pop_front()
    }

    /// Move a freshly started item into the active set.
    pub fn admit(&mut self, item: WorkItem, handle: H) {
        debug_assert!(self.active.len() < self.limit, "active set over limit");

        self.active.push(RunningProcess {
            item,
            handle,
            started: Instant::now(),
        });
        self.launched += 1;
        self.high_water = self.high_water.max(self.active.len());

        debug!(
            active = self.active.len(),
            limit = self.limit,
            pending = self.pending.len(),
            "item launched"
        );
    }

    /// Check every active process once without blocking.
    ///
    /// Finished processes are removed from the active set and returned in
    /// the order they were found; the rest keep their launch order.
    pub fn poll_active(&mut self) -> Vec<OutcomeRecord> {
        let mut finished = Vec::new();
        let mut i = 0;

        while i < self.active.len() {
            let status = match self.active[i].handle.try_wait() {
                Ok(None) => {
                    i += 1;
                    continue;
                }
                Ok(Some(code)) => OutcomeStatus::from_exit_code(code),
                Err(err) => {
                    warn!(
                        item = %self.active[i].item.id,
                        error = %err,
                        "could not query process status; counting it as failed"
                    );
                    OutcomeStatus::Failed(-1)
                }
            };

            let done = self.active.remove(i);
            finished.push(OutcomeRecord::new(
                &done.item,
                status,
                done.started.elapsed(),
            ));
        }

        finished
    }

    /// Whether the shell should sleep before the next polling pass.
    ///
    /// Only when the last pass saw no completion and either every slot is
    /// taken or there is nothing left to start.
    pub fn should_pause(&self, completed_in_pass: usize) -> bool {
        completed_in_pass == 0
            && !self.active.is_empty()
            && (self.active.len() == self.limit || self.pending.is_empty())
    }
}
