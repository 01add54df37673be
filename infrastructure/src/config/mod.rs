//! Configuration file loading for leap-studio
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `LEAP_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./leap.toml` or `./.leap.toml`
//! 4. Global: `<config dir>/leap-studio/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL,
    FALLBACK_API_KEY_ENV, FileConfig, FileExtractionConfig, FileLoggingConfig, FileModelConfig,
    FileOutputConfig, FileOutputFormat, FileStoreConfig,
};
pub use loader::ConfigLoader;
