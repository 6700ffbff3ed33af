use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use super::*;
use crate::outcome::{Action, FileErrorKind};

fn record(category: &str, action: Action, had_override: bool) -> OutcomeRecord {
    OutcomeRecord {
        path: PathBuf::from("/tree/file.pdf"),
        category: category.to_string(),
        had_override,
        action,
    }
}

fn assert_invariant(summary: &CategorySummary) {
    assert!(summary.files_cleared <= summary.files_with_override);
    assert!(summary.files_with_override <= summary.files_seen);
}

#[test]
fn counters_follow_actions() {
    let aggregator = MetricsAggregator::new();
    aggregator.start("pdf");
    aggregator.accumulate(&record("pdf", Action::Skipped, false));
    aggregator.accumulate(&record("pdf", Action::Cleared, true));
    aggregator.accumulate(&record("pdf", Action::WouldClear, true));
    aggregator.accumulate(&record(
        "pdf",
        Action::Error {
            kind: FileErrorKind::NotFound,
            detail: "gone".to_string(),
        },
        false,
    ));
    aggregator.finish("pdf");

    let report = aggregator.report();
    let pdf = &report.categories[0];
    assert_eq!(pdf.files_seen, 4);
    assert_eq!(pdf.files_with_override, 2);
    assert_eq!(pdf.files_cleared, 2);
    assert_eq!(pdf.errors, 1);
    assert_invariant(pdf);
}

#[test]
fn total_sums_every_category() {
    let aggregator = MetricsAggregator::new();
    aggregator.start("pdf");
    aggregator.start("html");
    aggregator.accumulate(&record("pdf", Action::Cleared, true));
    aggregator.accumulate(&record("pdf", Action::Skipped, false));
    aggregator.accumulate(&record("html", Action::Skipped, false));
    aggregator.finish("pdf");
    aggregator.finish("html");

    let report = aggregator.report();
    assert_eq!(report.total.files_seen, 3);
    assert_eq!(report.total.files_with_override, 1);
    assert_eq!(report.total.files_cleared, 1);
    assert_eq!(report.total.errors, 0);
    assert_invariant(&report.total);
}

#[test]
fn categories_keep_start_order() {
    let aggregator = MetricsAggregator::new();
    aggregator.start("pdf");
    aggregator.start("html");
    aggregator.start("txt");

    let report = aggregator.report();
    let names: Vec<_> = report.categories.iter().map(|c| c.category.clone()).collect();
    assert_eq!(names, vec!["pdf", "html", "txt"]);
}

#[test]
fn restart_resets_a_category() {
    let aggregator = MetricsAggregator::new();
    aggregator.start("pdf");
    aggregator.accumulate(&record("pdf", Action::Cleared, true));
    aggregator.start("pdf");

    let report = aggregator.report();
    assert_eq!(report.categories[0].files_seen, 0);
}

#[test]
fn report_is_queryable_before_finish() {
    let aggregator = MetricsAggregator::new();
    aggregator.start("pdf");
    aggregator.accumulate(&record("pdf", Action::Skipped, false));

    let report = aggregator.report();
    assert_eq!(report.categories[0].files_seen, 1);
    assert_invariant(&report.categories[0]);
}

#[test]
fn concurrent_accumulation_loses_nothing() {
    let aggregator = Arc::new(MetricsAggregator::new());
    aggregator.start("pdf");

    let mut handles = Vec::new();
    for _ in 0..8 {
        let aggregator = Arc::clone(&aggregator);
        handles.push(thread::spawn(move || {
            for _ in 0..1000 {
                aggregator.accumulate(&record("pdf", Action::Cleared, true));
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
    aggregator.finish("pdf");

    let report = aggregator.report();
    assert_eq!(report.total.files_seen, 8000);
    assert_eq!(report.total.files_cleared, 8000);
    assert_invariant(&report.total);
}

#[test]
fn has_errors_reflects_error_records() {
    let aggregator = MetricsAggregator::new();
    aggregator.start("pdf");
    assert!(!aggregator.report().has_errors());

    aggregator.accumulate(&record(
        "pdf",
        Action::Error {
            kind: FileErrorKind::PermissionDenied,
            detail: "denied".to_string(),
        },
        false,
    ));
    assert!(aggregator.report().has_errors());
}
