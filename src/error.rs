use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::outcome::FileErrorKind;

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Worker pool error: {0}")]
    Pool(String),
}

pub type Result<T> = std::result::Result<T, SweepError>;

/// Failure of a single attribute probe or clear operation.
///
/// These are always recovered locally: workers and the sampler convert them
/// into `Error` outcome records instead of unwinding.
#[derive(Error, Debug)]
pub enum AttrError {
    #[error("path not found: {path}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("permission denied: {path}")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("attribute access failed on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AttrError {
    /// Classify a raw I/O failure against a path.
    #[must_use]
    pub fn classify(path: &std::path::Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path, source },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path, source },
            _ => Self::Io { path, source },
        }
    }

    #[must_use]
    pub const fn kind(&self) -> FileErrorKind {
        match self {
            Self::NotFound { .. } => FileErrorKind::NotFound,
            Self::PermissionDenied { .. } => FileErrorKind::PermissionDenied,
            Self::Io { .. } => FileErrorKind::Other,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
