//! Adaptive sampling estimator.
//!
//! Probes a bounded random subset of the candidate population to decide,
//! cheaply, whether a full pass is worth running. Sample sizes are allocated
//! proportionally across suffix categories; selection is uniform without
//! replacement within each category.

use std::collections::HashMap;
use std::path::Path;

use rand::Rng;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::attr::AttrAccessor;
use crate::error::Result;
use crate::outcome::OutcomeRecord;
use crate::scanner::{CandidatePath, TreeScanner};

/// Coarse classification of how large a sample is relative to its population.
///
/// Purely informational; never gates correctness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// Sample covers at least 10% of the population.
    High,
    /// Sample covers at least 5% of the population.
    Medium,
    /// Sample covers at least 1% of the population.
    Low,
    /// Sample covers less than 1% of the population.
    VeryLow,
    /// Empty sample; no rate can be computed.
    NotComputable,
}

impl Confidence {
    fn classify(sampled_count: u64, population: u64) -> Self {
        if sampled_count == 0 || population == 0 {
            return Self::NotComputable;
        }
        // Integer comparison: sampled/population >= pct/100.
        let covered = sampled_count * 100;
        if covered >= population * 10 {
            Self::High
        } else if covered >= population * 5 {
            Self::Medium
        } else if covered >= population {
            Self::Low
        } else {
            Self::VeryLow
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::VeryLow => "very low",
            Self::NotComputable => "not computable",
        };
        f.write_str(label)
    }
}

/// Deterministic summary of one sampling pass.
#[derive(Debug, Clone, Serialize)]
pub struct SampleResult {
    pub population: u64,
    pub sampled_count: u64,
    pub hit_count: u64,
    pub hit_rate_percent: f64,
    pub estimated_population_hits: u64,
    pub confidence: Confidence,
}

impl SampleResult {
    /// Derive a result from raw counts.
    ///
    /// An empty sample yields a zero rate and [`Confidence::NotComputable`]
    /// rather than a division error.
    #[must_use]
    pub fn from_counts(population: u64, sampled_count: u64, hit_count: u64) -> Self {
        let (hit_rate_percent, estimated_population_hits) = if sampled_count == 0 {
            (0.0, 0)
        } else {
            #[allow(clippy::cast_precision_loss)]
            let rate = 100.0 * hit_count as f64 / sampled_count as f64;
            (rate, population * hit_count / sampled_count)
        };

        Self {
            population,
            sampled_count,
            hit_count,
            hit_rate_percent,
            estimated_population_hits,
            confidence: Confidence::classify(sampled_count, population),
        }
    }

    /// The all-zero result for an empty population.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_counts(0, 0, 0)
    }
}

/// Everything a sampling pass produced: the summary plus the raw records,
/// so callers can feed the records into a metrics aggregator if they wish.
#[derive(Debug)]
pub struct SampleRun {
    pub result: SampleResult,
    pub records: Vec<OutcomeRecord>,
}

/// Draws and probes a proportional random subset of the candidate tree.
pub struct Sampler<'a> {
    scanner: &'a TreeScanner,
    accessor: &'a AttrAccessor,
}

impl<'a> Sampler<'a> {
    #[must_use]
    pub const fn new(scanner: &'a TreeScanner, accessor: &'a AttrAccessor) -> Self {
        Self { scanner, accessor }
    }

    /// Sample up to `total_sample_size` candidates under `root`.
    ///
    /// # Errors
    /// Returns a configuration error if `root` is not an existing directory.
    pub fn sample(&self, root: &Path, total_sample_size: usize) -> Result<SampleRun> {
        self.sample_with_rng(root, total_sample_size, &mut rand::thread_rng())
    }

    /// Like [`sample`](Self::sample) with a caller-supplied RNG.
    ///
    /// # Errors
    /// Returns a configuration error if `root` is not an existing directory.
    pub fn sample_with_rng<R: Rng + ?Sized>(
        &self,
        root: &Path,
        total_sample_size: usize,
        rng: &mut R,
    ) -> Result<SampleRun> {
        let populations = self.scanner.populations(root)?;
        let population: u64 = populations.values().sum();
        if population == 0 {
            return Ok(SampleRun {
                result: SampleResult::empty(),
                records: Vec::new(),
            });
        }

        // Per-category draw: proportional share, at least one, capped at the
        // category's population. A full category is taken deterministically,
        // there is no point randomizing a complete read.
        let mut picks: HashMap<&str, CategoryPick> = HashMap::new();
        let mut selected_total = 0usize;
        for (category, &pop) in &populations {
            if pop == 0 {
                continue;
            }
            let share = (total_sample_size as u64 * pop / population).max(1);
            let target = share.min(pop) as usize;
            let chosen = if target as u64 == pop {
                (0..target).collect()
            } else {
                let mut indices = rand::seq::index::sample(rng, pop as usize, target).into_vec();
                indices.sort_unstable();
                indices
            };
            selected_total += target;
            picks.insert(category.as_str(), CategoryPick::new(chosen));
        }

        let selected = self.collect_selected(root, &mut picks, selected_total);
        debug!(
            population,
            selected = selected.len(),
            "sampling pass selected candidates"
        );

        let records: Vec<OutcomeRecord> = selected
            .par_iter()
            .map(|candidate| self.probe(candidate))
            .collect();

        let hit_count = records.iter().filter(|r| r.had_override).count() as u64;
        let result = SampleResult::from_counts(population, records.len() as u64, hit_count);
        Ok(SampleRun { result, records })
    }

    /// Walk the tree once, picking out the chosen per-category positions.
    fn collect_selected(
        &self,
        root: &Path,
        picks: &mut HashMap<&str, CategoryPick>,
        selected_total: usize,
    ) -> Vec<CandidatePath> {
        let mut selected = Vec::with_capacity(selected_total);
        for candidate in self.scanner.enumerate(root) {
            if let Some(pick) = picks.get_mut(candidate.category.as_str()) {
                if pick.advance() {
                    selected.push(candidate);
                }
                if selected.len() == selected_total {
                    break;
                }
            }
        }
        selected
    }

    fn probe(&self, candidate: &CandidatePath) -> OutcomeRecord {
        match self.accessor.has_override(&candidate.path) {
            Ok(true) => OutcomeRecord::observed(candidate),
            Ok(false) => OutcomeRecord::skipped(candidate),
            Err(e) => OutcomeRecord::failed(candidate, false, &e),
        }
    }
}

/// Chosen positions within one category's candidate sequence.
struct CategoryPick {
    chosen: Vec<usize>,
    next: usize,
    seen: usize,
}

impl CategoryPick {
    const fn new(chosen: Vec<usize>) -> Self {
        Self {
            chosen,
            next: 0,
            seen: 0,
        }
    }

    /// Whether the current sequence position is one of the chosen. Always
    /// advances the position.
    fn advance(&mut self) -> bool {
        let hit = self.next < self.chosen.len() && self.chosen[self.next] == self.seen;
        self.seen += 1;
        if hit {
            self.next += 1;
        }
        hit
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
