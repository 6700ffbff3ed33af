use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::{Result, SweepError};

/// Maps file names onto their suffix category and applies exclude patterns.
#[derive(Debug)]
pub struct SuffixFilter {
    categories: Vec<String>,
    exclude_patterns: GlobSet,
}

impl SuffixFilter {
    /// Create a new filter for the given suffix categories and exclude globs.
    ///
    /// Categories are normalized without a leading dot (`".pdf"` and `"pdf"`
    /// are the same category). Caller-supplied order is preserved: when a file
    /// name could match several categories, the first one wins.
    ///
    /// # Errors
    /// Returns an error if the category list is empty or an exclude pattern
    /// is invalid.
    pub fn new(categories: &[String], exclude_patterns: &[String]) -> Result<Self> {
        if categories.is_empty() {
            return Err(SweepError::Config(
                "at least one suffix category is required".to_string(),
            ));
        }

        let categories: Vec<String> = categories
            .iter()
            .map(|c| c.trim_start_matches('.').to_string())
            .collect();
        if categories.iter().any(String::is_empty) {
            return Err(SweepError::Config(
                "suffix categories cannot be empty".to_string(),
            ));
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in exclude_patterns {
            let glob = Glob::new(pattern).map_err(|e| SweepError::InvalidPattern {
                pattern: pattern.clone(),
                source: e,
            })?;
            builder.add(glob);
        }
        let exclude_patterns = builder.build().map_err(|e| SweepError::InvalidPattern {
            pattern: "combined patterns".to_string(),
            source: e,
        })?;

        Ok(Self {
            categories,
            exclude_patterns,
        })
    }

    /// Normalized categories, in caller-supplied order.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// The category a path belongs to, or `None` if it matches no category
    /// or is excluded.
    #[must_use]
    pub fn category_for(&self, path: &Path) -> Option<&str> {
        if self.is_excluded(path) {
            return None;
        }

        let file_name = path.file_name()?.to_str()?;
        self.categories
            .iter()
            .find(|cat| has_suffix(file_name, cat))
            .map(String::as_str)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        self.exclude_patterns.is_match(path)
    }
}

/// Suffix match with a mandatory dot separator: `report.pdf` matches `pdf`
/// and `tar.gz`, but a bare `pdf` file or `mypdf` does not match `pdf`.
fn has_suffix(file_name: &str, category: &str) -> bool {
    file_name
        .strip_suffix(category)
        .is_some_and(|stem| stem.ends_with('.') && stem.len() > 1)
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
