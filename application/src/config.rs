//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave.

use leap_domain::ExtractOptions;

/// Generation behavior configuration.
///
/// Controls how model output is turned into structured results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationConfig {
    /// JSON extraction mode applied to every model answer.
    pub extract: ExtractOptions,
}

impl GenerationConfig {
    /// Creates a GenerationConfig with bracket scanning switched on or off.
    pub fn with_bracket_scan(bracket_scan: bool) -> Self {
        Self {
            extract: ExtractOptions { bracket_scan },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_greedy() {
        assert!(GenerationConfig::default().extract.bracket_scan);
        assert_eq!(
            GenerationConfig::with_bracket_scan(false).extract,
            ExtractOptions::strict()
        );
    }
}
