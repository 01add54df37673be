//! Presentation layer for leap-studio
//!
//! This crate contains CLI definitions, output formatters
//! and progress reporters.

pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, CommunityCommand, ConfigCommand, OutputFormatArg};
pub use config::OutputConfig;
pub use output::community::CommunityFormatter;
pub use output::console::ConsoleFormatter;
pub use output::formatter::ConsoleRender;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
