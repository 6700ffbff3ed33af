//! Per-category metrics accumulation.
//!
//! The aggregator is the only shared mutable state in the system: workers on
//! any thread may call [`MetricsAggregator::accumulate`] concurrently, so the
//! counters live behind one mutex. Accumulation is commutative; the final
//! totals do not depend on completion order.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use indexmap::IndexMap;
use serde::Serialize;

use crate::outcome::OutcomeRecord;

/// Counter set for one suffix category.
///
/// Owned exclusively by the aggregator and mutated only through its API, so
/// `files_cleared <= files_with_override <= files_seen` holds at all times.
#[derive(Debug, Clone, Default)]
struct CategoryMetrics {
    files_seen: u64,
    files_with_override: u64,
    files_cleared: u64,
    errors: u64,
    started_at: Option<Instant>,
    elapsed: Option<Duration>,
}

impl CategoryMetrics {
    fn accumulate(&mut self, record: &OutcomeRecord) {
        self.files_seen += 1;
        if record.had_override {
            self.files_with_override += 1;
        }
        if record.is_clearing() {
            self.files_cleared += 1;
        }
        if record.is_error() {
            self.errors += 1;
        }
    }

    /// Elapsed time, live until [`finish`](MetricsAggregator::finish) freezes it.
    fn elapsed(&self) -> Duration {
        self.elapsed
            .or_else(|| self.started_at.map(|s| s.elapsed()))
            .unwrap_or_default()
    }
}

/// Snapshot of one category (or the grand total) for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub category: String,
    pub files_seen: u64,
    pub files_with_override: u64,
    pub files_cleared: u64,
    pub errors: u64,
    pub elapsed_secs: f64,
    pub files_per_sec: f64,
}

impl CategorySummary {
    fn from_metrics(category: &str, metrics: &CategoryMetrics) -> Self {
        Self::from_counts(category, metrics, metrics.elapsed())
    }

    fn from_counts(category: &str, metrics: &CategoryMetrics, elapsed: Duration) -> Self {
        let elapsed_secs = elapsed.as_secs_f64();
        #[allow(clippy::cast_precision_loss)]
        let files_per_sec = if elapsed_secs > 0.0 {
            metrics.files_seen as f64 / elapsed_secs
        } else {
            0.0
        };
        Self {
            category: category.to_string(),
            files_seen: metrics.files_seen,
            files_with_override: metrics.files_with_override,
            files_cleared: metrics.files_cleared,
            errors: metrics.errors,
            elapsed_secs,
            files_per_sec,
        }
    }
}

/// Final (or partial, after cancellation) aggregation across categories.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub categories: Vec<CategorySummary>,
    pub total: CategorySummary,
}

impl Report {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.total.errors > 0
    }
}

/// Accumulates outcome records into per-category counters.
#[derive(Debug, Default)]
pub struct MetricsAggregator {
    inner: Mutex<IndexMap<String, CategoryMetrics>>,
}

impl MetricsAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin accounting for a category. A second `start` for the same
    /// category resets its counters and timer.
    pub fn start(&self, category: &str) {
        let mut inner = self.lock();
        inner.insert(
            category.to_string(),
            CategoryMetrics {
                started_at: Some(Instant::now()),
                ..CategoryMetrics::default()
            },
        );
    }

    /// Fold one outcome record into its category's counters.
    pub fn accumulate(&self, record: &OutcomeRecord) {
        let mut inner = self.lock();
        inner
            .entry(record.category.clone())
            .or_default()
            .accumulate(record);
    }

    /// Freeze a category's elapsed time and processing rate.
    pub fn finish(&self, category: &str) {
        let mut inner = self.lock();
        if let Some(metrics) = inner.get_mut(category) {
            metrics.elapsed = Some(
                metrics
                    .started_at
                    .map(|s| s.elapsed())
                    .unwrap_or_default(),
            );
        }
    }

    /// Snapshot every category plus the grand total, in category order.
    ///
    /// Queryable at any time; reflects every record accumulated so far, so a
    /// cancelled run still reports a consistent partial result.
    #[must_use]
    pub fn report(&self) -> Report {
        let inner = self.lock();
        let categories: Vec<CategorySummary> = inner
            .iter()
            .map(|(name, metrics)| CategorySummary::from_metrics(name, metrics))
            .collect();

        let mut total = CategoryMetrics::default();
        let mut total_elapsed = Duration::ZERO;
        for metrics in inner.values() {
            total.files_seen += metrics.files_seen;
            total.files_with_override += metrics.files_with_override;
            total.files_cleared += metrics.files_cleared;
            total.errors += metrics.errors;
            // Categories run concurrently; wall time is the longest of them.
            total_elapsed = total_elapsed.max(metrics.elapsed());
        }

        Report {
            categories,
            total: CategorySummary::from_counts("total", &total, total_elapsed),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, IndexMap<String, CategoryMetrics>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
