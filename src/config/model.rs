use serde::{Deserialize, Serialize};

use crate::attr::DEFAULT_ATTRIBUTE;
use crate::error::{Result, SweepError};

/// Effective configuration, merged from the config file and CLI overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub sampling: SamplingConfig,
    pub limits: LimitsConfig,
}

/// What to walk and which attribute to clear.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File-name suffixes to target, in priority order (first match wins).
    pub categories: Vec<String>,
    /// Glob patterns excluded from the walk.
    pub exclude: Vec<String>,
    /// Extended attribute carrying the per-file handler override.
    pub attribute: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            exclude: Vec::new(),
            attribute: DEFAULT_ATTRIBUTE.to_string(),
        }
    }
}

/// Sampling estimator policy.
///
/// `min_sample` is the smallest sample allowed to justify skipping the full
/// pass on zero hits; it is policy, not an invariant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    pub sample_size: usize,
    pub min_sample: u64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            sample_size: 400,
            min_sample: 50,
        }
    }
}

/// Resource ceilings for the full pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Estimated-hit ceiling above which the operator must confirm.
    pub max_files: u64,
    /// Worker count; 0 resolves to ~75% of available cores.
    pub concurrency: usize,
    /// Capacity of the bounded work and result queues.
    pub queue_capacity: usize,
    /// Stop dispatching after the first per-file failure.
    pub halt_on_error: bool,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_files: 100_000,
            concurrency: 0,
            queue_capacity: 1024,
            halt_on_error: false,
        }
    }
}

impl Config {
    /// Semantic validation beyond what deserialization enforces.
    ///
    /// # Errors
    /// Returns a configuration error for values no run could accept.
    pub fn validate(&self) -> Result<()> {
        if self.scan.attribute.trim().is_empty() {
            return Err(SweepError::Config(
                "scan.attribute cannot be empty".to_string(),
            ));
        }
        if self.limits.queue_capacity == 0 {
            return Err(SweepError::Config(
                "limits.queue_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
