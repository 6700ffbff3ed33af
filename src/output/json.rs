use crate::error::Result;
use crate::metrics::Report;
use crate::sampler::SampleResult;

use super::ReportFormatter;

/// Machine-readable output for scripting and log ingestion.
pub struct JsonFormatter;

impl ReportFormatter for JsonFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        let json = serde_json::to_string_pretty(report)?;
        Ok(format!("{json}\n"))
    }

    fn format_sample(&self, result: &SampleResult) -> Result<String> {
        let json = serde_json::to_string_pretty(result)?;
        Ok(format!("{json}\n"))
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
