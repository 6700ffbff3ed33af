//! Pure decision logic between the sampling estimate and the full pass.
//!
//! No I/O, deterministic given its inputs.

use crate::sampler::SampleResult;

/// Whether the full pass can be skipped outright.
///
/// True only when the sample observed zero hits AND is large enough to be
/// decisive. A sample below `min_sample` is inconclusive even at zero hits:
/// the answer is "proceed", never "skip on thin evidence".
#[must_use]
pub const fn should_skip_full_pass(result: &SampleResult, min_sample: u64) -> bool {
    result.sampled_count >= min_sample && result.hit_count == 0
}

/// Whether the operator must confirm before the full pass runs.
///
/// True when the estimated number of override-bearing files exceeds the
/// configured ceiling. Obtaining the actual consent is the caller's concern;
/// this module never blocks on terminal input.
#[must_use]
pub const fn requires_confirmation(result: &SampleResult, max_files: u64) -> bool {
    result.estimated_population_hits > max_files
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
