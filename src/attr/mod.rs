//! Access to the per-file "open with" override attribute.
//!
//! This is the only module that touches the host's extended-attribute store.
//! It is stateless and safe to call concurrently against different paths.

use std::io;
use std::path::Path;

use crate::error::AttrError;

/// Attribute used by the host to pin a file to a specific handler.
pub const DEFAULT_ATTRIBUTE: &str = "com.apple.LaunchServices.OpenWith";

/// Result of a clear operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearStatus {
    /// The attribute was present and has been removed.
    Cleared,
    /// The attribute was already absent; clearing is a no-op success.
    AlreadyClear,
}

/// Reads and removes one named extended attribute on individual files.
#[derive(Debug, Clone)]
pub struct AttrAccessor {
    name: String,
}

impl AttrAccessor {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Query whether the override attribute is present on `path`.
    ///
    /// An absent attribute is the normal case and reports `false`, not an
    /// error. Only genuine I/O failures (vanished path, permission denied,
    /// device errors) surface as [`AttrError`].
    ///
    /// # Errors
    /// Returns an error if the attribute store cannot be read.
    pub fn has_override(&self, path: &Path) -> Result<bool, AttrError> {
        match xattr::get(path, &self.name) {
            Ok(value) => Ok(value.is_some()),
            // A filesystem without an attribute store cannot carry an override.
            Err(e) if is_attr_missing(&e) || e.kind() == io::ErrorKind::Unsupported => Ok(false),
            Err(e) => Err(AttrError::classify(path, e)),
        }
    }

    /// Remove the override attribute from `path`.
    ///
    /// Idempotent: clearing an already-clear file succeeds with
    /// [`ClearStatus::AlreadyClear`]. File content and timestamps are never
    /// touched, only the attribute store.
    ///
    /// # Errors
    /// Returns an error if the attribute store cannot be written.
    pub fn clear_override(&self, path: &Path) -> Result<ClearStatus, AttrError> {
        match xattr::remove(path, &self.name) {
            Ok(()) => Ok(ClearStatus::Cleared),
            Err(e) if is_attr_missing(&e) || e.kind() == io::ErrorKind::Unsupported => {
                Ok(ClearStatus::AlreadyClear)
            }
            Err(e) => Err(AttrError::classify(path, e)),
        }
    }
}

/// Whether an I/O error means "no such attribute" rather than a real failure.
///
/// The kernel reports a missing attribute as ENODATA (ENOATTR on the BSDs and
/// macOS), which does not map onto a portable `io::ErrorKind`.
fn is_attr_missing(e: &io::Error) -> bool {
    #[cfg(any(target_os = "macos", target_os = "ios", target_os = "freebsd"))]
    const MISSING_ATTR: i32 = 93; // ENOATTR
    #[cfg(not(any(target_os = "macos", target_os = "ios", target_os = "freebsd")))]
    const MISSING_ATTR: i32 = 61; // ENODATA

    e.raw_os_error() == Some(MISSING_ATTR)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
