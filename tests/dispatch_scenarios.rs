// tests/dispatch_scenarios.rs

mod common;
use crate::common::{init_tracing, options, with_timeout, UNIT};

use tokio::time::Instant;

use batchconv::dispatch::{Dispatcher, OutcomeStatus};
use batchconv::report::RunSummary;
use batchconv_test_utils::builders::{numbered_items, WorkItemBuilder};
use batchconv_test_utils::fake_launcher::SimulatedLauncher;
use batchconv_test_utils::recording_reporter::RecordingReporter;

#[tokio::test(start_paused = true)]
async fn all_successful_items_are_reported_once() {
    init_tracing();

    let launcher = SimulatedLauncher::new(UNIT);
    let stats = launcher.stats();
    let reporter = RecordingReporter::new();

    let summary = with_timeout(
        Dispatcher::new(numbered_items(7), options(3), launcher, reporter.clone()).run(),
    )
    .await;

    let recorded = reporter.snapshot();
    assert_eq!(recorded.outcomes.len(), 7);
    assert_eq!(recorded.successes(), 7);
    assert_eq!(
        summary,
        RunSummary {
            launched: 7,
            succeeded: 7,
            failed: 0
        }
    );
    assert_eq!(recorded.summary, Some(summary));
    assert!(!recorded.nothing_to_do);

    let stats = stats.lock().unwrap();
    assert_eq!(stats.high_water, 3);
    assert_eq!(stats.running, 0);
}

#[tokio::test(start_paused = true)]
async fn one_failing_item_does_not_cancel_its_siblings() {
    init_tracing();

    let launcher = SimulatedLauncher::new(UNIT)
        .with_exit_code("item_3", 2)
        // Fails long before the others finish.
        .with_delay("item_3", UNIT / 10);
    let stats = launcher.stats();
    let reporter = RecordingReporter::new();

    let summary = with_timeout(
        Dispatcher::new(numbered_items(6), options(4), launcher, reporter.clone()).run(),
    )
    .await;

    let recorded = reporter.snapshot();
    let failures = recorded.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].id, "item_3");
    assert_eq!(failures[0].status, OutcomeStatus::Failed(2));
    assert_eq!(recorded.successes(), 5);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.succeeded, 5);
    assert_eq!(stats.lock().unwrap().launched.len(), 6);
}

#[tokio::test(start_paused = true)]
async fn launch_failure_is_a_distinct_outcome_for_that_item_only() {
    init_tracing();

    let launcher = SimulatedLauncher::new(UNIT).refusing("item_1");
    let reporter = RecordingReporter::new();

    let summary = with_timeout(
        Dispatcher::new(numbered_items(4), options(2), launcher, reporter.clone()).run(),
    )
    .await;

    let recorded = reporter.snapshot();
    let failures = recorded.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].id, "item_1");
    assert!(matches!(failures[0].status, OutcomeStatus::LaunchFailed(_)));
    assert_eq!(failures[0].status.exit_code(), None);

    assert_eq!(recorded.launched, vec!["item_0", "item_2", "item_3"]);
    assert_eq!(
        summary,
        RunSummary {
            launched: 3,
            succeeded: 3,
            failed: 1
        }
    );
}

#[tokio::test(start_paused = true)]
async fn empty_batch_launches_nothing() {
    init_tracing();

    let launcher = SimulatedLauncher::new(UNIT);
    let stats = launcher.stats();
    let reporter = RecordingReporter::new();

    let summary = Dispatcher::new(Vec::new(), options(4), launcher, reporter.clone())
        .run()
        .await;

    let recorded = reporter.snapshot();
    assert!(recorded.nothing_to_do);
    assert!(recorded.outcomes.is_empty());
    assert_eq!(summary, RunSummary::default());
    assert!(stats.lock().unwrap().launched.is_empty());
}

#[tokio::test(start_paused = true)]
async fn two_slots_finish_five_unit_jobs_in_three_units() {
    init_tracing();

    let launcher = SimulatedLauncher::new(UNIT);
    let reporter = RecordingReporter::new();

    let start = Instant::now();
    let summary = with_timeout(
        Dispatcher::new(numbered_items(5), options(2), launcher, reporter.clone()).run(),
    )
    .await;
    let elapsed = start.elapsed();

    assert_eq!(summary.succeeded, 5);
    assert!(elapsed >= UNIT * 3, "finished too early: {elapsed:?}");
    assert!(elapsed < UNIT * 4, "no real overlap: {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn completions_are_streamed_in_finishing_order() {
    init_tracing();

    let items = vec![
        WorkItemBuilder::new("slow").build(),
        WorkItemBuilder::new("fast").build(),
        WorkItemBuilder::new("medium").build(),
    ];
    let launcher = SimulatedLauncher::new(UNIT)
        .with_delay("slow", UNIT * 3)
        .with_delay("fast", UNIT)
        .with_delay("medium", UNIT * 2);
    let reporter = RecordingReporter::new();

    with_timeout(Dispatcher::new(items, options(3), launcher, reporter.clone()).run()).await;

    let recorded = reporter.snapshot();
    assert_eq!(recorded.launched, vec!["slow", "fast", "medium"]);
    assert_eq!(recorded.outcome_ids(), vec!["fast", "medium", "slow"]);
}

#[tokio::test(start_paused = true)]
async fn freed_slot_is_refilled_before_slowest_item_finishes() {
    init_tracing();

    // item_0 runs for the whole batch; the single remaining slot cycles
    // through the rest.
    let launcher = SimulatedLauncher::new(UNIT).with_delay("item_0", UNIT * 10);
    let reporter = RecordingReporter::new();

    let start = Instant::now();
    with_timeout(Dispatcher::new(numbered_items(5), options(2), launcher, reporter.clone()).run())
        .await;

    let recorded = reporter.snapshot();
    assert_eq!(
        recorded.outcome_ids(),
        vec!["item_1", "item_2", "item_3", "item_4", "item_0"]
    );
    assert!(start.elapsed() < UNIT * 11);
}

#[tokio::test(start_paused = true)]
async fn single_slot_launches_in_source_order() {
    init_tracing();

    let launcher = SimulatedLauncher::new(UNIT);
    let stats = launcher.stats();
    let reporter = RecordingReporter::new();

    with_timeout(Dispatcher::new(numbered_items(4), options(1), launcher, reporter.clone()).run())
        .await;

    let stats = stats.lock().unwrap();
    assert_eq!(stats.launched, vec!["item_0", "item_1", "item_2", "item_3"]);
    assert_eq!(stats.high_water, 1);
}

#[tokio::test(start_paused = true)]
async fn slow_launch_delays_completion_notice_by_at_most_the_launch_time() {
    init_tracing();

    // "quick" finishes long before "slow-start" is done launching; its exit is
    // noticed on the first poll after that launch returns.
    let items = vec![
        WorkItemBuilder::new("quick").build(),
        WorkItemBuilder::new("slow-start").build(),
    ];
    let launcher = SimulatedLauncher::new(UNIT)
        .with_delay("quick", UNIT / 10)
        .with_launch_delay("slow-start", UNIT * 5);
    let reporter = RecordingReporter::new();

    with_timeout(Dispatcher::new(items, options(2), launcher, reporter.clone()).run()).await;

    let recorded = reporter.snapshot();
    let quick = &recorded.outcomes[0];
    assert_eq!(quick.id, "quick");
    assert!(quick.elapsed >= UNIT * 5, "noticed early: {:?}", quick.elapsed);
    assert!(
        quick.elapsed < UNIT * 5 + options(2).poll_interval,
        "noticed late: {:?}",
        quick.elapsed
    );
}
