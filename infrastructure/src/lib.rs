//! Infrastructure layer for leap-studio
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod gemini;
pub mod logging;
pub mod persistence;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileLoggingConfig, FileModelConfig,
    FileOutputConfig, FileStoreConfig,
};
pub use gemini::GeminiGateway;
pub use logging::JsonlGenerationLogger;
pub use persistence::JsonFileSnapshotRepository;
