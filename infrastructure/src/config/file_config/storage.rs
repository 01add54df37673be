//! `[extraction]`, `[store]` and `[logging]` sections

use leap_application::GenerationConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const APP_DIR: &str = "leap-studio";

/// Raw extraction configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExtractionConfig {
    /// Scan for the outermost bracket span when no fence encloses the answer
    pub bracket_scan: bool,
}

impl Default for FileExtractionConfig {
    fn default() -> Self {
        Self { bracket_scan: true }
    }
}

impl FileExtractionConfig {
    pub fn to_generation_config(&self) -> GenerationConfig {
        GenerationConfig::with_bracket_scan(self.bracket_scan)
    }
}

/// Raw community store configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStoreConfig {
    /// Snapshot file; defaults to the platform data directory
    pub path: Option<PathBuf>,
}

impl FileStoreConfig {
    /// `path`, else `<data dir>/leap-studio/community.json`, else `./.leap/community.json`
    pub fn resolve_path(&self) -> PathBuf {
        if let Some(path) = &self.path {
            return path.clone();
        }
        dirs::data_dir()
            .map(|d| d.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from(".leap"))
            .join("community.json")
    }
}

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving every prompt and classified response
    pub generation_log: Option<PathBuf>,
    /// Directory for daily-rotated diagnostic logs
    pub dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_path_override() {
        let config = FileStoreConfig {
            path: Some(PathBuf::from("/tmp/leap/community.json")),
        };
        assert_eq!(config.resolve_path(), PathBuf::from("/tmp/leap/community.json"));
    }

    #[test]
    fn test_default_store_path_file_name() {
        let path = FileStoreConfig::default().resolve_path();
        assert!(path.ends_with("community.json"));
    }

    #[test]
    fn test_extraction_maps_to_generation_config() {
        let strict = FileExtractionConfig { bracket_scan: false };
        assert!(!strict.to_generation_config().extract.bracket_scan);
    }
}
