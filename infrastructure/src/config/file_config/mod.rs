//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod model;
mod output;
mod storage;

pub use model::{
    DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL, FALLBACK_API_KEY_ENV, FileModelConfig,
};
pub use output::{FileOutputConfig, FileOutputFormat};
pub use storage::{FileExtractionConfig, FileLoggingConfig, FileStoreConfig};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("model.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("model.name cannot be empty")]
    EmptyModelName,

    #[error("model.base_url must start with http:// or https:// (got '{0}')")]
    InvalidBaseUrl(String),

    #[error("model.api_key_env cannot be empty")]
    EmptyApiKeyEnv,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model transport settings
    pub model: FileModelConfig,
    /// JSON extraction settings
    pub extraction: FileExtractionConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Community store settings
    pub store: FileStoreConfig,
    /// Log file settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.model.name.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if self.model.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if !(self.model.base_url.starts_with("http://") || self.model.base_url.starts_with("https://")) {
            return Err(ConfigValidationError::InvalidBaseUrl(self.model.base_url.clone()));
        }
        if self.model.api_key_env.trim().is_empty() {
            return Err(ConfigValidationError::EmptyApiKeyEnv);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leap_domain::OutputFormat;
    use std::path::PathBuf;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[model]
name = "gemini-2.5-pro"
timeout_seconds = 90

[extraction]
bracket_scan = false

[output]
format = "json"
color = false

[store]
path = "/tmp/leap/community.json"

[logging]
generation_log = "/tmp/leap/generations.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.model.name, "gemini-2.5-pro");
        assert_eq!(config.model.timeout_seconds, 90);
        assert_eq!(config.model.base_url, DEFAULT_BASE_URL);
        assert!(!config.extraction.bracket_scan);
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);
        assert_eq!(config.store.path, Some(PathBuf::from("/tmp/leap/community.json")));
        assert!(config.logging.generation_log.is_some());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config, FileConfig::default());
        assert!(config.extraction.bracket_scan);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = FileConfig::default();
        config.model.timeout_seconds = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));

        let mut config = FileConfig::default();
        config.model.name = " ".to_string();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyModelName));

        let mut config = FileConfig::default();
        config.model.base_url = "generativelanguage.googleapis.com".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidBaseUrl(_))
        ));
    }
}
