mod filter;
mod types;

pub use filter::SuffixFilter;
pub use types::CandidatePath;

use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Result, SweepError};

/// Recursive, suffix-filtered enumerator over a directory tree.
///
/// Produces a lazy sequence of [`CandidatePath`]s. The sequence is
/// restartable (every call to [`enumerate`](Self::enumerate) performs a fresh
/// walk) but bounded only by the tree's contents at walk time; concurrent
/// external modification is not defended against.
pub struct TreeScanner {
    filter: Arc<SuffixFilter>,
}

impl TreeScanner {
    #[must_use]
    pub fn new(filter: SuffixFilter) -> Self {
        Self {
            filter: Arc::new(filter),
        }
    }

    /// Normalized categories, in caller-supplied order.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        self.filter.categories()
    }

    /// Reject roots the walk cannot possibly succeed on.
    ///
    /// # Errors
    /// Returns a configuration error if `root` is not an existing directory.
    pub fn check_root(root: &Path) -> Result<()> {
        if root.is_dir() {
            Ok(())
        } else {
            Err(SweepError::Config(format!(
                "target directory not found: {}",
                root.display()
            )))
        }
    }

    /// Start a fresh lazy walk of `root`, yielding matching candidates.
    ///
    /// Unreadable directory entries are skipped, not fatal: the walk keeps
    /// going and the entry is logged at debug level.
    #[must_use]
    pub fn enumerate(&self, root: &Path) -> Enumeration {
        Enumeration {
            walker: WalkDir::new(root).into_iter(),
            filter: Arc::clone(&self.filter),
        }
    }

    /// Count candidates in one category without materializing paths.
    ///
    /// # Errors
    /// Returns a configuration error if `root` is not an existing directory.
    pub fn count_for_category(&self, root: &Path, category: &str) -> Result<u64> {
        Self::check_root(root)?;
        Ok(self
            .enumerate(root)
            .filter(|c| c.category == category)
            .count() as u64)
    }

    /// Per-category population counts for the whole tree, in category order.
    ///
    /// Categories with no candidates are present with a zero count, so the
    /// result always has one entry per configured category.
    ///
    /// # Errors
    /// Returns a configuration error if `root` is not an existing directory.
    pub fn populations(&self, root: &Path) -> Result<IndexMap<String, u64>> {
        Self::check_root(root)?;

        let mut counts: IndexMap<String, u64> = self
            .filter
            .categories()
            .iter()
            .map(|c| (c.clone(), 0))
            .collect();
        for candidate in self.enumerate(root) {
            if let Some(count) = counts.get_mut(&candidate.category) {
                *count += 1;
            }
        }
        Ok(counts)
    }
}

/// One in-progress walk. Owned and `Send`, so a producer thread can drive it.
pub struct Enumeration {
    walker: walkdir::IntoIter,
    filter: Arc<SuffixFilter>,
}

impl Iterator for Enumeration {
    type Item = CandidatePath;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    debug!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(category) = self.filter.category_for(entry.path()) {
                return Some(CandidatePath::new(
                    entry.path().to_path_buf(),
                    category.to_string(),
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
