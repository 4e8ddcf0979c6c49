use std::sync::{Arc, Mutex};

use batchconv::dispatch::OutcomeRecord;
use batchconv::report::{Reporter, RunSummary};
use batchconv::source::WorkItem;

/// Everything a dispatch run reported, in arrival order.
#[derive(Debug, Default, Clone)]
pub struct Recorded {
    pub launched: Vec<String>,
    pub outcomes: Vec<OutcomeRecord>,
    pub nothing_to_do: bool,
    pub summary: Option<RunSummary>,
}

impl Recorded {
    pub fn outcome_ids(&self) -> Vec<String> {
        self.outcomes.iter().map(|o| o.id.clone()).collect()
    }

    pub fn successes(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status.is_success()).count()
    }

    pub fn failures(&self) -> Vec<&OutcomeRecord> {
        self.outcomes
            .iter()
            .filter(|o| !o.status.is_success())
            .collect()
    }
}

/// A reporter that stores events behind a shared handle.
#[derive(Debug, Default, Clone)]
pub struct RecordingReporter {
    recorded: Arc<Mutex<Recorded>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Recorded {
        self.recorded.lock().unwrap().clone()
    }
}

impl Reporter for RecordingReporter {
    fn launched(&mut self, item: &WorkItem) {
        self.recorded.lock().unwrap().launched.push(item.id.clone());
    }

    fn finished(&mut self, outcome: &OutcomeRecord) {
        self.recorded.lock().unwrap().outcomes.push(outcome.clone());
    }

    fn nothing_to_do(&mut self) {
        self.recorded.lock().unwrap().nothing_to_do = true;
    }

    fn summary(&mut self, summary: &RunSummary) {
        self.recorded.lock().unwrap().summary = Some(*summary);
    }
}
