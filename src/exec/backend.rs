// src/exec/backend.rs

//! Pluggable launcher abstraction.
//!
//! The dispatcher talks to a `Launcher` instead of spawning processes itself.
//! This makes it easy to swap in a simulated launcher in tests while keeping
//! the production implementation in [`process`](super::process).
//!
//! - `ProcessLauncher` is the default implementation used by `batchconv`.
//!   It builds the profile's command line and spawns it with null stdio.
//! - Tests can provide their own `Launcher` whose handles finish after a
//!   simulated delay, or fail to launch on purpose.

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;
use crate::source::WorkItem;

/// A launched conversion whose completion can be checked without blocking.
pub trait ProcessHandle: Send {
    /// Returns `Ok(None)` while the process is still running and
    /// `Ok(Some(code))` once it has exited. A process that ended without an
    /// exit code (e.g. killed by a signal) reports `-1`.
    fn try_wait(&mut self) -> Result<Option<i32>>;
}

/// Trait abstracting how work items are started.
pub trait Launcher: Send {
    type Handle: ProcessHandle;

    /// Start the conversion for `item` and return as soon as it is running.
    ///
    /// An error means the item could not be started at all; the dispatcher
    /// turns it into a failed outcome for this item only.
    fn launch<'a>(
        &'a mut self,
        item: &'a WorkItem,
    ) -> Pin<Box<dyn Future<Output = Result<Self::Handle>> + Send + 'a>>;
}
