//! Presentation-level configuration
//!
//! Resolved output settings: file config first, command-line flags on top.

use leap_domain::OutputFormat;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Show a spinner while waiting for the model
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Pretty,
            color: true,
            show_progress: true,
        }
    }
}

impl OutputConfig {
    /// Settings as read from the `[output]` config section
    pub fn from_file(format: Option<OutputFormat>, color: bool, show_progress: bool) -> Self {
        Self {
            format: format.unwrap_or_default(),
            color,
            show_progress,
        }
    }

    /// Apply `--output`, `--no-color` and `--quiet`.
    ///
    /// JSON output is always uncolored so it stays machine-readable.
    pub fn with_cli_overrides(mut self, format: Option<OutputFormat>, no_color: bool, quiet: bool) -> Self {
        if let Some(format) = format {
            self.format = format;
        }
        if no_color || self.format == OutputFormat::Json {
            self.color = false;
        }
        if quiet {
            self.show_progress = false;
        }
        self
    }

    /// Install the color choice process-wide
    pub fn apply(&self) {
        colored::control::set_override(self.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_flags_override_file() {
        let config = OutputConfig::from_file(Some(OutputFormat::Json), true, true)
            .with_cli_overrides(Some(OutputFormat::Pretty), false, true);
        assert_eq!(config.format, OutputFormat::Pretty);
        assert!(config.color);
        assert!(!config.show_progress);
    }

    #[test]
    fn test_json_disables_color() {
        let config = OutputConfig::from_file(None, true, true).with_cli_overrides(
            Some(OutputFormat::Json),
            false,
            false,
        );
        assert!(!config.color);
        assert!(config.show_progress);
    }

    #[test]
    fn test_defaults_without_overrides() {
        let config = OutputConfig::from_file(None, true, true).with_cli_overrides(None, false, false);
        assert_eq!(config, OutputConfig::default());
    }
}
