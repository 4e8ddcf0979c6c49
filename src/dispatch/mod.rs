// src/dispatch/mod.rs

//! Bounded dispatch of work items.
//!
//! Each item moves `Pending -> Launched -> Completed`. At most `limit` items
//! are in the launched state at any time; new items are started in source
//! order as slots free up, and completions are reported as soon as they are
//! observed, in whatever order the processes finish.
//!
//! The pure state lives in [`core`]; the async polling loop around it is
//! implemented in [`runtime`].

use std::path::PathBuf;
use std::time::Duration;

use crate::source::WorkItem;

/// Terminal status of one work item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeStatus {
    Success,
    /// The program ran and exited with a non-zero code (`-1` for signals).
    Failed(i32),
    /// The program could not be started.
    LaunchFailed(String),
}

impl OutcomeStatus {
    pub fn from_exit_code(code: i32) -> Self {
        if code == 0 {
            OutcomeStatus::Success
        } else {
            OutcomeStatus::Failed(code)
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, OutcomeStatus::Success)
    }

    /// Exit code of the program, if it ran at all.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            OutcomeStatus::Success => Some(0),
            OutcomeStatus::Failed(code) => Some(*code),
            OutcomeStatus::LaunchFailed(_) => None,
        }
    }
}

/// Result of one completed work item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeRecord {
    pub id: String,
    pub input: PathBuf,
    pub output: PathBuf,
    pub status: OutcomeStatus,
    /// Time from launch to observed completion; zero for launch failures.
    pub elapsed: Duration,
}

impl OutcomeRecord {
    pub fn new(item: &WorkItem, status: OutcomeStatus, elapsed: Duration) -> Self {
        Self {
            id: item.id.clone(),
            input: item.input.clone(),
            output: item.output.clone(),
            status,
            elapsed,
        }
    }

    pub fn input_name(&self) -> String {
        self.input.to_string_lossy().into_owned()
    }

    pub fn output_name(&self) -> String {
        self.output.to_string_lossy().into_owned()
    }
}

/// Knobs for one dispatch run.
#[derive(Debug, Clone, Copy)]
pub struct DispatchOptions {
    /// Maximum number of items in the launched state.
    pub limit: usize,
    /// Pause between polling passes that observed no completion.
    pub poll_interval: Duration,
}

impl DispatchOptions {
    pub fn new(limit: usize, poll_interval: Duration) -> Self {
        Self {
            limit,
            poll_interval,
        }
    }
}

/// Number of processing units available to this process (at least 1).
pub fn host_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

pub mod core;
pub mod runtime;

pub use self::core::{DispatchCore, RunningProcess};
pub use self::runtime::Dispatcher;
