use super::*;
use crate::sampler::SampleResult;

fn summary(category: &str, seen: u64, overrides: u64, cleared: u64, errors: u64) -> CategorySummary {
    CategorySummary {
        category: category.to_string(),
        files_seen: seen,
        files_with_override: overrides,
        files_cleared: cleared,
        errors,
        elapsed_secs: 0.5,
        files_per_sec: 100.0,
    }
}

fn report() -> Report {
    Report {
        categories: vec![summary("pdf", 500, 12, 12, 0), summary("html", 200, 0, 0, 0)],
        total: summary("total", 700, 12, 12, 0),
    }
}

#[test]
fn report_lists_every_category_and_total() {
    let output = TextFormatter::new(ColorMode::Never)
        .format_report(&report())
        .unwrap();

    assert!(output.contains("pdf"));
    assert!(output.contains("html"));
    assert!(output.contains("total"));
    assert!(output.contains("Cleared 12 of 12 override(s) across 700 file(s)"));
}

#[test]
fn errors_appear_in_summary_line() {
    let mut report = report();
    report.total.errors = 3;
    let output = TextFormatter::new(ColorMode::Never)
        .format_report(&report)
        .unwrap();

    assert!(output.contains("3 error(s)"));
}

#[test]
fn never_mode_emits_no_ansi_codes() {
    let output = TextFormatter::new(ColorMode::Never)
        .format_report(&report())
        .unwrap();
    assert!(!output.contains("\x1b["));
}

#[test]
fn always_mode_colors_the_summary() {
    let output = TextFormatter::new(ColorMode::Always)
        .format_report(&report())
        .unwrap();
    assert!(output.contains("\x1b[32m"));
}

#[test]
fn sample_output_names_the_estimate() {
    let result = SampleResult::from_counts(1000, 100, 3);
    let output = TextFormatter::new(ColorMode::Never)
        .format_sample(&result)
        .unwrap();

    assert!(output.contains("population:      1000"));
    assert!(output.contains("sampled:         100"));
    assert!(output.contains("confidence: high"));
    assert!(output.contains("estimated total: 30"));
}
