use std::path::PathBuf;

use serde::Serialize;

use crate::error::AttrError;
use crate::scanner::CandidatePath;

/// Classification of a per-file failure.
///
/// Per-file failures are data, not control flow: they are carried inside an
/// [`OutcomeRecord`] and never abort a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileErrorKind {
    /// The path vanished between enumeration and processing.
    NotFound,
    /// The host denied the metadata read or write.
    PermissionDenied,
    /// Any other I/O failure.
    Other,
}

/// What happened to a single candidate file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// No override attribute was present; nothing to do.
    Skipped,
    /// The override attribute was present and has been removed.
    Cleared,
    /// Dry-run mode: the override attribute is present and would be removed.
    WouldClear,
    /// The probe or clear operation failed for this file.
    Error {
        kind: FileErrorKind,
        detail: String,
    },
}

/// The outcome of processing one candidate file.
///
/// Exactly one record is produced per processed candidate, by either the
/// sampler's probe loop or a worker. Immutable once emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeRecord {
    pub path: PathBuf,
    pub category: String,
    pub had_override: bool,
    pub action: Action,
}

impl OutcomeRecord {
    #[must_use]
    pub fn skipped(candidate: &CandidatePath) -> Self {
        Self {
            path: candidate.path.clone(),
            category: candidate.category.clone(),
            had_override: false,
            action: Action::Skipped,
        }
    }

    /// A probe-only observation of a present override (sampling never clears).
    #[must_use]
    pub fn observed(candidate: &CandidatePath) -> Self {
        Self {
            path: candidate.path.clone(),
            category: candidate.category.clone(),
            had_override: true,
            action: Action::Skipped,
        }
    }

    #[must_use]
    pub fn cleared(candidate: &CandidatePath) -> Self {
        Self {
            path: candidate.path.clone(),
            category: candidate.category.clone(),
            had_override: true,
            action: Action::Cleared,
        }
    }

    #[must_use]
    pub fn would_clear(candidate: &CandidatePath) -> Self {
        Self {
            path: candidate.path.clone(),
            category: candidate.category.clone(),
            had_override: true,
            action: Action::WouldClear,
        }
    }

    #[must_use]
    pub fn failed(candidate: &CandidatePath, had_override: bool, error: &AttrError) -> Self {
        Self {
            path: candidate.path.clone(),
            category: candidate.category.clone(),
            had_override,
            action: Action::Error {
                kind: error.kind(),
                detail: error.to_string(),
            },
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.action, Action::Error { .. })
    }

    /// True for actions that removed (or would remove) the override.
    #[must_use]
    pub const fn is_clearing(&self) -> bool {
        matches!(self.action, Action::Cleared | Action::WouldClear)
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
