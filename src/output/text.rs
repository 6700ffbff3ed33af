use std::fmt::Write;

use crate::error::Result;
use crate::metrics::{CategorySummary, Report};
use crate::sampler::SampleResult;

use super::ReportFormatter;

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// ANSI color codes
mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const RESET: &str = "\x1b[0m";
}

pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                // Respect NO_COLOR environment variable
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{}", ansi::RESET)
        } else {
            text.to_string()
        }
    }

    fn summary_line(&self, total: &CategorySummary) -> String {
        let line = format!(
            "Cleared {} of {} override(s) across {} file(s) in {:.2}s",
            total.files_cleared, total.files_with_override, total.files_seen, total.elapsed_secs
        );
        if total.errors > 0 {
            let errors = self.paint(&format!("{} error(s)", total.errors), ansi::RED);
            format!("{line} ({errors})")
        } else {
            self.paint(&line, ansi::GREEN)
        }
    }
}

impl ReportFormatter for TextFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        let mut output = String::new();

        writeln!(
            output,
            "{:<12} {:>10} {:>10} {:>10} {:>8} {:>12}",
            "Category", "Seen", "Overrides", "Cleared", "Errors", "Rate"
        )
        .ok();
        for category in &report.categories {
            writeln!(
                output,
                "{:<12} {:>10} {:>10} {:>10} {:>8} {:>10.1}/s",
                category.category,
                category.files_seen,
                category.files_with_override,
                category.files_cleared,
                category.errors,
                category.files_per_sec
            )
            .ok();
        }
        writeln!(
            output,
            "{:<12} {:>10} {:>10} {:>10} {:>8}",
            "total",
            report.total.files_seen,
            report.total.files_with_override,
            report.total.files_cleared,
            report.total.errors
        )
        .ok();
        output.push('\n');
        output.push_str(&self.summary_line(&report.total));
        output.push('\n');

        Ok(output)
    }

    fn format_sample(&self, result: &SampleResult) -> Result<String> {
        let mut output = String::new();
        writeln!(output, "Sampling estimate").ok();
        writeln!(output, "  population:      {} file(s)", result.population).ok();
        writeln!(
            output,
            "  sampled:         {} (confidence: {})",
            result.sampled_count, result.confidence
        )
        .ok();

        let hits = format!(
            "  hits:            {} ({:.1}%)",
            result.hit_count, result.hit_rate_percent
        );
        if result.hit_count > 0 {
            writeln!(output, "{}", self.paint(&hits, ansi::YELLOW)).ok();
        } else {
            writeln!(output, "{hits}").ok();
        }
        writeln!(
            output,
            "  estimated total: {} file(s) with override",
            result.estimated_population_hits
        )
        .ok();

        Ok(output)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
