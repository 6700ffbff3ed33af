#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Attribute name used throughout the integration tests. A `user.` prefix is
/// required for unprivileged xattr writes on Linux.
pub const TEST_ATTR: &str = "user.openwith.test";

/// Creates an `assert_cmd` Command for the openwith-sweep binary.
pub fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::cargo_bin("openwith-sweep").expect("binary should exist")
}

/// Creates a temporary directory tree with candidate files for tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Creates `count` empty files named `file<i>.<suffix>`.
    pub fn create_files(&self, count: usize, suffix: &str) -> Vec<PathBuf> {
        (0..count)
            .map(|i| {
                let path = self.path().join(format!("file{i}.{suffix}"));
                fs::write(&path, "").expect("Failed to write file");
                path
            })
            .collect()
    }

    /// Creates a file under a nested relative path.
    pub fn create_file_at(&self, relative_path: &str) -> PathBuf {
        let path = self.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, "").expect("Failed to write file");
        path
    }

    /// Sets the override attribute on a file.
    pub fn tag(&self, path: &Path) {
        xattr::set(path, TEST_ATTR, b"custom-handler").expect("Failed to set xattr");
    }

    pub fn is_tagged(&self, path: &Path) -> bool {
        xattr::get(path, TEST_ATTR)
            .map(|v| v.is_some())
            .unwrap_or(false)
    }

    /// Whether the fixture's filesystem accepts user xattrs at all; tests
    /// that tag files should return early when it does not.
    pub fn xattr_supported(&self) -> bool {
        let probe = self.path().join(".xattr-probe");
        fs::write(&probe, b"").expect("Failed to write probe");
        let ok = xattr::set(&probe, TEST_ATTR, b"1").is_ok();
        fs::remove_file(&probe).expect("Failed to remove probe");
        ok
    }
}
