//! Console output formatter for generation results

use crate::output::formatter::ConsoleRender;
use colored::Colorize;
use leap_domain::{Clarification, OutputFormat, StructuredResult};
use serde::Serialize;

const RETRY_HINT: &str = "Please try again.";

/// Formats generation results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a classified result in the requested format
    pub fn format_result<T>(result: &StructuredResult<T>, format: OutputFormat) -> String
    where
        T: ConsoleRender + Serialize,
    {
        match format {
            OutputFormat::Json => Self::format_json(result),
            OutputFormat::Pretty => match result {
                StructuredResult::Success(payload) => Self::format(payload),
                StructuredResult::Clarification(c) => Self::format_clarification(c),
            },
        }
    }

    /// Banner, body and footer for one payload
    pub fn format<T: ConsoleRender>(payload: &T) -> String {
        let mut output = String::new();
        output.push_str(&Self::header(&payload.title()));
        output.push('\n');
        output.push_str(&payload.render());
        output.push_str(&Self::footer());
        output
    }

    /// JSON with a `kind` tag so scripts can branch without guessing
    pub fn format_json<T: Serialize>(result: &StructuredResult<T>) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// The model needs more input before it can answer
    pub fn format_clarification(clarification: &Clarification) -> String {
        format!(
            "{}\n  {}\n\n{}\n",
            "More information needed".yellow().bold(),
            clarification.question,
            "Add the missing details and run the command again.".dimmed()
        )
    }

    /// Error line, plus a retry hint when resending could help and the
    /// message does not already say so
    pub fn format_error(message: &str, retryable: bool) -> String {
        let mut output = format!("{} {}\n", "Error:".red().bold(), message);
        if retryable && !message.contains(RETRY_HINT) {
            output.push_str(&format!("{}\n", RETRY_HINT.dimmed()));
        }
        output
    }

    pub fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    pub fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// `Label: value`, skipped entirely when the value is blank
    pub fn field(label: &str, value: &str) -> String {
        if value.trim().is_empty() {
            return String::new();
        }
        format!("{} {}\n", format!("{}:", label).bold(), value)
    }

    pub fn bullets<S: AsRef<str>>(items: &[S]) -> String {
        items
            .iter()
            .map(|item| format!("  * {}\n", item.as_ref()))
            .collect()
    }

    pub fn numbered<S: AsRef<str>>(items: &[S]) -> String {
        items
            .iter()
            .enumerate()
            .map(|(i, item)| format!("  {}. {}\n", i + 1, item.as_ref()))
            .collect()
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Note(&'static str);

    impl ConsoleRender for Note {
        fn title(&self) -> String {
            "Note".to_string()
        }

        fn render(&self) -> String {
            self.0.to_string()
        }
    }

    impl Serialize for Note {
        fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(self.0)
        }
    }

    #[test]
    fn test_json_output_tags_kind() {
        let success = StructuredResult::Success(Note("hello"));
        let value: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&success)).unwrap();
        assert_eq!(value["kind"], "success");
        assert_eq!(value["payload"], "hello");

        let clarification: StructuredResult<Note> =
            StructuredResult::Clarification(Clarification::new("Which market?"));
        let value: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&clarification)).unwrap();
        assert_eq!(value["kind"], "clarification");
        assert_eq!(value["clarificationNeeded"], "Which market?");
    }

    #[test]
    fn test_pretty_output_contains_body() {
        colored::control::set_override(false);
        let output =
            ConsoleFormatter::format_result(&StructuredResult::Success(Note("body")), OutputFormat::Pretty);
        assert!(output.contains("Note"));
        assert!(output.contains("body"));

        let clarification: StructuredResult<Note> =
            StructuredResult::Clarification(Clarification::new("Which market?"));
        let output = ConsoleFormatter::format_result(&clarification, OutputFormat::Pretty);
        assert!(output.contains("Which market?"));
    }

    #[test]
    fn test_helpers() {
        colored::control::set_override(false);
        assert_eq!(ConsoleFormatter::field("Stage", " "), "");
        assert_eq!(ConsoleFormatter::field("Stage", "MVP"), "Stage: MVP\n");
        assert_eq!(ConsoleFormatter::numbered(&["a", "b"]), "  1. a\n  2. b\n");
        assert_eq!(ConsoleFormatter::indent("a\nb", "> "), "> a\n> b");
        assert!(ConsoleFormatter::format_error("boom", true).contains("try again"));
        assert!(!ConsoleFormatter::format_error("boom", false).contains("try again"));

        let message = "The AI returned an unexpected response. Please try again.";
        let output = ConsoleFormatter::format_error(message, true);
        assert_eq!(output.matches("Please try again.").count(), 1);
    }
}
