mod json;
mod progress;
mod text;

pub use json::JsonFormatter;
pub use progress::SweepProgress;
pub use text::{ColorMode, TextFormatter};

use crate::error::Result;
use crate::metrics::Report;
use crate::sampler::SampleResult;

/// Trait for rendering run results into various output formats.
pub trait ReportFormatter {
    /// Format the final (or partial) report.
    ///
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format_report(&self, report: &Report) -> Result<String>;

    /// Format a sampling estimate.
    ///
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format_sample(&self, result: &SampleResult) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
