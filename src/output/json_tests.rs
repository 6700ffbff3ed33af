use super::*;
use crate::metrics::MetricsAggregator;
use crate::sampler::SampleResult;

#[test]
fn report_serializes_to_valid_json() {
    let aggregator = MetricsAggregator::new();
    aggregator.start("pdf");
    aggregator.finish("pdf");

    let output = JsonFormatter.format_report(&aggregator.report()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["categories"][0]["category"], "pdf");
    assert_eq!(parsed["total"]["files_seen"], 0);
}

#[test]
fn sample_serializes_confidence_as_snake_case() {
    let result = SampleResult::from_counts(1000, 100, 3);
    let output = JsonFormatter.format_sample(&result).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["confidence"], "high");
    assert_eq!(parsed["estimated_population_hits"], 30);
}
