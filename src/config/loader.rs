use std::fs;
use std::path::Path;

use crate::error::Result;

use super::Config;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".openwith-sweep.toml";

/// Trait for loading configuration, so tests can inject their own source.
pub trait ConfigLoader {
    /// Load configuration from the default location, falling back to
    /// defaults when no file exists.
    ///
    /// # Errors
    /// Returns an error if an existing file cannot be read or parsed.
    fn load(&self) -> Result<Config>;

    /// Load configuration from an explicit path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    fn load_from_path(&self, path: &Path) -> Result<Config>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FileConfigLoader;

impl FileConfigLoader {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ConfigLoader for FileConfigLoader {
    fn load(&self) -> Result<Config> {
        let default_path = Path::new(CONFIG_FILE_NAME);
        if default_path.exists() {
            self.load_from_path(default_path)
        } else {
            Ok(Config::default())
        }
    }

    fn load_from_path(&self, path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
