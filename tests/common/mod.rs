#![allow(dead_code)]

use std::time::Duration;

use batchconv::dispatch::DispatchOptions;

pub use batchconv_test_utils::{init_tracing, with_timeout};

/// One simulated "time unit" for dispatch scenarios.
pub const UNIT: Duration = Duration::from_millis(100);

/// Dispatch options with a short poll interval, for paused-clock tests.
pub fn options(limit: usize) -> DispatchOptions {
    DispatchOptions::new(limit, Duration::from_millis(10))
}
