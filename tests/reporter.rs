// tests/reporter.rs

use std::path::PathBuf;
use std::time::Duration;

use batchconv::dispatch::{OutcomeRecord, OutcomeStatus};
use batchconv::report::{format_outcome, ConsoleReporter, Reporter, RunSummary};
use batchconv_test_utils::builders::WorkItemBuilder;

fn outcome(status: OutcomeStatus) -> OutcomeRecord {
    let item = WorkItemBuilder::new("scan.tif")
        .input("scan.tif")
        .output("scan.pdf")
        .build();
    OutcomeRecord::new(&item, status, Duration::from_millis(1200))
}

fn output_of(reporter: ConsoleReporter<Vec<u8>>) -> String {
    String::from_utf8(reporter.into_inner()).unwrap()
}

#[test]
fn test_outcome_lines() {
    assert_eq!(format_outcome(&outcome(OutcomeStatus::Success)), "finished scan.pdf");
    assert_eq!(
        format_outcome(&outcome(OutcomeStatus::Failed(3))),
        "conversion of scan.tif failed, return code 3"
    );
    assert_eq!(
        format_outcome(&outcome(OutcomeStatus::LaunchFailed("no such file".into()))),
        "conversion of scan.tif failed, could not start: no such file"
    );
}

#[test]
fn test_console_reporter_writes_one_line_per_outcome() {
    let mut reporter = ConsoleReporter::new(Vec::new());

    reporter.finished(&outcome(OutcomeStatus::Success));
    reporter.finished(&outcome(OutcomeStatus::Failed(1)));

    let mut summary = RunSummary::default();
    summary.record(&OutcomeStatus::Success);
    summary.record(&OutcomeStatus::Failed(1));
    reporter.summary(&summary);

    assert_eq!(
        output_of(reporter),
        "finished scan.pdf\n\
         conversion of scan.tif failed, return code 1\n\
         1 of 2 conversions failed\n"
    );
}

#[test]
fn test_successful_run_has_no_summary_line() {
    let mut reporter = ConsoleReporter::new(Vec::new());

    reporter.finished(&outcome(OutcomeStatus::Success));
    reporter.summary(&RunSummary {
        launched: 1,
        succeeded: 1,
        failed: 0,
    });

    assert_eq!(output_of(reporter), "finished scan.pdf\n");
}

#[test]
fn test_nothing_to_do_prints_usage_hint() {
    let mut reporter = ConsoleReporter::new(Vec::new()).with_usage_hint("usage: try harder");
    reporter.nothing_to_do();

    assert_eq!(output_of(reporter), "nothing to do\nusage: try harder\n");

    let mut bare = ConsoleReporter::new(Vec::new());
    bare.nothing_to_do();
    assert_eq!(output_of(bare), "nothing to do\n");
}

#[test]
fn test_run_summary_counts() {
    let mut summary = RunSummary::default();
    summary.record(&OutcomeStatus::Success);
    summary.record(&OutcomeStatus::Failed(-1));
    summary.record(&OutcomeStatus::LaunchFailed("x".into()));

    assert_eq!(summary.launched, 2);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 2);
    assert_eq!(summary.total(), 3);
    assert!(!summary.all_succeeded());
}

#[test]
fn test_outcome_record_copies_item_paths() {
    let record = outcome(OutcomeStatus::Failed(9));
    assert_eq!(record.id, "scan.tif");
    assert_eq!(record.input, PathBuf::from("scan.tif"));
    assert_eq!(record.output, PathBuf::from("scan.pdf"));
    assert_eq!(record.status.exit_code(), Some(9));
    assert!(!record.status.is_success());
    assert_eq!(OutcomeStatus::from_exit_code(0), OutcomeStatus::Success);
}
