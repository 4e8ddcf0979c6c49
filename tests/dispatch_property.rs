// tests/dispatch_property.rs

mod common;
use crate::common::options;

use std::collections::{BTreeSet, HashSet};
use std::time::Duration;

use proptest::prelude::*;

use batchconv::dispatch::Dispatcher;
use batchconv_test_utils::builders::numbered_items;
use batchconv_test_utils::fake_launcher::SimulatedLauncher;
use batchconv_test_utils::recording_reporter::RecordingReporter;

fn paused_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .expect("building test runtime")
}

proptest! {
    #[test]
    fn active_set_never_exceeds_limit_and_every_item_completes(
        delays in proptest::collection::vec(1u64..200, 0..40),
        limit in 1usize..8,
        failing_indices in proptest::collection::vec(any::<usize>(), 0..5),
        refused_indices in proptest::collection::vec(any::<usize>(), 0..3),
    ) {
        let n = delays.len();
        let items = numbered_items(n);

        let mut launcher = SimulatedLauncher::new(Duration::from_millis(1));
        for (i, delay) in delays.iter().enumerate() {
            launcher = launcher.with_delay(&format!("item_{i}"), Duration::from_millis(*delay));
        }

        let mut failing: HashSet<String> = HashSet::new();
        let mut refused: HashSet<String> = HashSet::new();
        if n > 0 {
            for idx in &refused_indices {
                let id = format!("item_{}", idx % n);
                launcher = launcher.refusing(&id);
                refused.insert(id);
            }
            for idx in &failing_indices {
                let id = format!("item_{}", idx % n);
                if refused.contains(&id) {
                    continue;
                }
                launcher = launcher.with_exit_code(&id, 1);
                failing.insert(id);
            }
        }

        let stats = launcher.stats();
        let reporter = RecordingReporter::new();

        let summary = paused_runtime().block_on(
            Dispatcher::new(items, options(limit), launcher, reporter.clone()).run(),
        );

        let recorded = reporter.snapshot();
        let stats = stats.lock().unwrap();

        prop_assert!(stats.high_water <= limit, "high water {} > limit {}", stats.high_water, limit);
        prop_assert_eq!(stats.running, 0);

        // Exactly one outcome per item.
        prop_assert_eq!(recorded.outcomes.len(), n);
        let ids: BTreeSet<String> = recorded.outcome_ids().into_iter().collect();
        prop_assert_eq!(ids.len(), n);

        prop_assert_eq!(summary.total(), n);
        prop_assert_eq!(summary.launched, n - refused.len());
        prop_assert_eq!(summary.failed, failing.len() + refused.len());
        prop_assert_eq!(recorded.nothing_to_do, n == 0);
    }
}
