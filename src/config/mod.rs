mod loader;
mod model;

pub use loader::{CONFIG_FILE_NAME, ConfigLoader, FileConfigLoader};
pub use model::{Config, LimitsConfig, SamplingConfig, ScanConfig};
