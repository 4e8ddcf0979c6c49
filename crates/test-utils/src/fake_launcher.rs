use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;

use batchconv::errors::{BatchError, Result};
use batchconv::exec::{Launcher, ProcessHandle};
use batchconv::source::WorkItem;

/// What the simulated launcher observed.
#[derive(Debug, Default, Clone)]
pub struct LaunchStats {
    /// Item ids in launch order.
    pub launched: Vec<String>,
    /// Processes started but not yet observed as finished.
    pub running: usize,
    /// Largest value `running` ever reached.
    pub high_water: usize,
}

/// A launcher whose "processes" finish after a per-item delay measured on
/// the Tokio clock, so tests can run with paused time.
///
/// - records which items were launched, and the concurrency high-water mark
/// - lets tests pick exit codes, slow launches, and items that refuse to
///   launch at all
pub struct SimulatedLauncher {
    default_delay: Duration,
    delays: HashMap<String, Duration>,
    launch_delays: HashMap<String, Duration>,
    exit_codes: HashMap<String, i32>,
    refuse: HashSet<String>,
    stats: Arc<Mutex<LaunchStats>>,
}

impl SimulatedLauncher {
    pub fn new(default_delay: Duration) -> Self {
        Self {
            default_delay,
            delays: HashMap::new(),
            launch_delays: HashMap::new(),
            exit_codes: HashMap::new(),
            refuse: HashSet::new(),
            stats: Arc::new(Mutex::new(LaunchStats::default())),
        }
    }

    pub fn with_delay(mut self, id: &str, delay: Duration) -> Self {
        self.delays.insert(id.to_string(), delay);
        self
    }

    /// Make `launch` itself take `delay` for this item, like a slow tiffinfo run
    /// before the real spawn.
    pub fn with_launch_delay(mut self, id: &str, delay: Duration) -> Self {
        self.launch_delays.insert(id.to_string(), delay);
        self
    }

    pub fn with_exit_code(mut self, id: &str, code: i32) -> Self {
        self.exit_codes.insert(id.to_string(), code);
        self
    }

    pub fn refusing(mut self, id: &str) -> Self {
        self.refuse.insert(id.to_string());
        self
    }

    /// Shared view of the statistics; stays valid after the launcher moved.
    pub fn stats(&self) -> Arc<Mutex<LaunchStats>> {
        Arc::clone(&self.stats)
    }
}

impl Launcher for SimulatedLauncher {
    type Handle = SimulatedHandle;

    fn launch<'a>(
        &'a mut self,
        item: &'a WorkItem,
    ) -> Pin<Box<dyn Future<Output = Result<Self::Handle>> + Send + 'a>> {
        Box::pin(async move {
            if let Some(delay) = self.launch_delays.get(&item.id).copied() {
                tokio::time::sleep(delay).await;
            }

            if self.refuse.contains(&item.id) {
                return Err(BatchError::Launch {
                    program: "simulated".to_string(),
                    reason: format!("refusing to start {}", item.id),
                });
            }

            let delay = self
                .delays
                .get(&item.id)
                .copied()
                .unwrap_or(self.default_delay);
            let code = self.exit_codes.get(&item.id).copied().unwrap_or(0);

            {
                let mut stats = self.stats.lock().unwrap();
                stats.launched.push(item.id.clone());
                stats.running += 1;
                stats.high_water = stats.high_water.max(stats.running);
            }

            Ok(SimulatedHandle {
                finish_at: Instant::now() + delay,
                code,
                done: false,
                stats: Arc::clone(&self.stats),
            })
        })
    }
}

pub struct SimulatedHandle {
    finish_at: Instant,
    code: i32,
    done: bool,
    stats: Arc<Mutex<LaunchStats>>,
}

impl ProcessHandle for SimulatedHandle {
    fn try_wait(&mut self) -> Result<Option<i32>> {
        if self.done {
            return Ok(Some(self.code));
        }
        if Instant::now() < self.finish_at {
            return Ok(None);
        }

        self.done = true;
        self.stats.lock().unwrap().running -= 1;
        Ok(Some(self.code))
    }
}

/// Handle whose exit is controlled by the test through a shared slot.
#[derive(Debug, Clone, Default)]
pub struct ManualHandle {
    exit: Arc<Mutex<Option<i32>>>,
    broken: bool,
}

impl ManualHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle whose status query always fails.
    pub fn broken() -> Self {
        Self {
            exit: Arc::default(),
            broken: true,
        }
    }

    pub fn finish(&self, code: i32) {
        *self.exit.lock().unwrap() = Some(code);
    }
}

impl ProcessHandle for ManualHandle {
    fn try_wait(&mut self) -> Result<Option<i32>> {
        if self.broken {
            return Err(BatchError::Io(std::io::Error::other("status unavailable")));
        }
        Ok(*self.exit.lock().unwrap())
    }
}
