//! Model transport configuration from TOML (`[model]` section)

use serde::{Deserialize, Serialize};

/// Default Gemini model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
/// Default Gemini REST endpoint root
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Environment variable checked first for the API key
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Environment variable accepted when the primary one is unset
pub const FALLBACK_API_KEY_ENV: &str = "API_KEY";

/// Raw model configuration from TOML
///
/// # Example
///
/// ```toml
/// [model]
/// name = "gemini-2.5-flash"
/// api_key_env = "GEMINI_API_KEY"
/// timeout_seconds = 60
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    pub name: String,
    pub base_url: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    /// Inline key; takes precedence over the environment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for FileModelConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            api_key: None,
            timeout_seconds: 60,
        }
    }
}

impl FileModelConfig {
    /// Resolve the API key from config, then `api_key_env`, then `API_KEY`.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    /// Same as [`Self::resolve_api_key`] with an injectable variable lookup.
    pub fn resolve_api_key_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        let non_empty = |v: String| (!v.trim().is_empty()).then(|| v.trim().to_string());

        self.api_key
            .clone()
            .and_then(non_empty)
            .or_else(|| lookup(&self.api_key_env).and_then(non_empty))
            .or_else(|| lookup(FALLBACK_API_KEY_ENV).and_then(non_empty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_api_key_precedence() {
        let config = FileModelConfig::default();
        assert_eq!(
            config.resolve_api_key_with(env(&[("GEMINI_API_KEY", "g"), ("API_KEY", "a")])),
            Some("g".to_string())
        );
        assert_eq!(
            config.resolve_api_key_with(env(&[("API_KEY", "a")])),
            Some("a".to_string())
        );
        assert_eq!(config.resolve_api_key_with(env(&[("GEMINI_API_KEY", "  ")])), None);

        let inline = FileModelConfig {
            api_key: Some("inline".to_string()),
            ..FileModelConfig::default()
        };
        assert_eq!(
            inline.resolve_api_key_with(env(&[("GEMINI_API_KEY", "g")])),
            Some("inline".to_string())
        );
    }

    #[test]
    fn test_custom_env_name() {
        let config = FileModelConfig {
            api_key_env: "LEAP_KEY".to_string(),
            ..FileModelConfig::default()
        };
        assert_eq!(
            config.resolve_api_key_with(env(&[("LEAP_KEY", "k"), ("GEMINI_API_KEY", "g")])),
            Some("k".to_string())
        );
    }
}
