//! JSON recovery from free-form model output.
//!
//! Models asked to "return only JSON" still wrap their answer in prose or
//! Markdown fences often enough that a plain `serde_json::from_str` is not
//! usable. [`extract_json`] narrows the text down to a JSON candidate
//! before parsing:
//!
//! 1. A fence spanning the whole (trimmed) text, optionally tagged `json`
//! 2. Otherwise the span from the first `{`/`[` to the last `}`/`]`
//! 3. Otherwise the trimmed text itself
//!
//! The extractor never looks at the shape of the parsed value; see
//! [`super::structured`] for that.

use super::error::ResponseFormatError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

const FENCE: &str = "```";
const JSON_TAG: &str = "json";

/// Knobs for [`extract_json_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Fall back to greedy bracket scanning when no enclosing fence is found.
    ///
    /// With this off, the post-fence text must parse as a single JSON value.
    pub bracket_scan: bool,
}

impl ExtractOptions {
    /// Greedy mode: fence stripping plus bracket scanning.
    pub const fn greedy() -> Self {
        Self { bracket_scan: true }
    }

    /// Strict mode: fence stripping only.
    pub const fn strict() -> Self {
        Self {
            bracket_scan: false,
        }
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self::greedy()
    }
}

/// Extract and parse a JSON value from raw model text (greedy mode).
pub fn extract_json(text: &str) -> Result<Value, ResponseFormatError> {
    extract_json_with(text, &ExtractOptions::default())
}

/// Extract and parse a JSON value from raw model text.
pub fn extract_json_with(text: &str, options: &ExtractOptions) -> Result<Value, ResponseFormatError> {
    parse_candidate(json_candidate(text, options))
}

/// Extract and deserialize directly into `T`.
///
/// The caller asserts the shape: any mismatch between the text and `T` is
/// reported as a [`ResponseFormatError`], exactly like unparsable text.
/// Prefer [`extract_json`] plus [`super::structured::classify`] when the
/// response may be one of several shapes.
pub fn extract_json_as<T: DeserializeOwned>(
    text: &str,
    options: &ExtractOptions,
) -> Result<T, ResponseFormatError> {
    parse_candidate(json_candidate(text, options))
}

/// Narrow raw model text down to the substring that should be parsed.
pub fn json_candidate<'a>(text: &'a str, options: &ExtractOptions) -> &'a str {
    let trimmed = text.trim();

    if let Some(inner) = strip_enclosing_fence(trimmed) {
        return inner;
    }

    if options.bracket_scan
        && let Some(span) = bracket_span(trimmed)
    {
        return span;
    }

    trimmed
}

fn parse_candidate<T: DeserializeOwned>(candidate: &str) -> Result<T, ResponseFormatError> {
    serde_json::from_str(candidate).map_err(|e| {
        warn!(
            error = %e,
            candidate = candidate,
            "Failed to parse JSON response content"
        );
        ResponseFormatError::new(candidate, e.to_string())
    })
}

/// Contents of a fence that opens at the very start and closes at the very
/// end of `s`. Returns `None` when there is no such fence or it is empty.
fn strip_enclosing_fence(s: &str) -> Option<&str> {
    if s.len() < FENCE.len() * 2 || !s.starts_with(FENCE) || !s.ends_with(FENCE) {
        return None;
    }

    let inner = &s[FENCE.len()..s.len() - FENCE.len()];
    let inner = inner.strip_prefix(JSON_TAG).unwrap_or(inner).trim();

    if inner.is_empty() { None } else { Some(inner) }
}

/// Greedy span from the earliest opening bracket to the latest closing one.
fn bracket_span(s: &str) -> Option<&str> {
    let start = s.find(['{', '['])?;
    let end = s.rfind(['}', ']'])?;
    if end <= start {
        return None;
    }
    Some(&s[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn samples() -> Vec<Value> {
        vec![
            json!({"a": 1, "b": [true, null, "x"]}),
            json!([1, 2, {"nested": {"deep": "value"}}]),
            json!({"text": "contains } and ] inside a string"}),
            json!({"unicode": "नमस्ते ₹25 Lakhs"}),
            json!([]),
            json!({}),
        ]
    }

    #[test]
    fn test_fenced_json_is_unwrapped() {
        for v in samples() {
            let text = format!("```json\n{}\n```", serde_json::to_string(&v).unwrap());
            assert_eq!(extract_json(&text).unwrap(), v);
        }
    }

    #[test]
    fn test_bare_json_passes_through() {
        for v in samples() {
            let text = serde_json::to_string(&v).unwrap();
            assert_eq!(extract_json(&text).unwrap(), v);
        }
    }

    #[test]
    fn test_prose_wrapped_object_is_isolated() {
        for v in samples().into_iter().filter(Value::is_object) {
            let text = format!(
                "Sure! Here's the result:\n{}\nLet me know if you need changes.",
                serde_json::to_string(&v).unwrap()
            );
            assert_eq!(extract_json(&text).unwrap(), v);
        }
    }

    #[test]
    fn test_untagged_fence_and_inner_whitespace() {
        let text = "  ```\n\n  {\"ok\": true}  \n\n```  ";
        assert_eq!(extract_json(text).unwrap(), json!({"ok": true}));

        let text = "```json {\"ok\": true} ```";
        assert_eq!(extract_json(text).unwrap(), json!({"ok": true}));
    }

    #[test]
    fn test_pretty_printed_fence() {
        let text = "```json\n{\n  \"overallScore\": 72,\n  \"strengths\": [\"Pace\"]\n}\n```";
        assert_eq!(
            extract_json(text).unwrap(),
            json!({"overallScore": 72, "strengths": ["Pace"]})
        );
    }

    #[test]
    fn test_fence_inside_prose_falls_through_to_bracket_scan() {
        let text = "Here you go:\n```json\n{\"a\": 1}\n```\nCheers!";
        assert_eq!(extract_json(text).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_trailing_sentences_are_ignored() {
        let text = r#"{"whatHappened": "A raise", "whyItMatters": "Signal", "whatYouCanLearn": []} I hope this helps. Good luck with your startup!"#;
        let value = extract_json(text).unwrap();
        assert_eq!(value["whatHappened"], "A raise");
    }

    #[test]
    fn test_array_before_object_wins_start() {
        let text = "Result: [{\"platform\": \"Instagram\"}] done";
        assert_eq!(
            extract_json(text).unwrap(),
            json!([{"platform": "Instagram"}])
        );
    }

    #[test]
    fn test_sibling_fragments_fail_greedy_capture() {
        // Known limitation: two top-level values are captured as one span.
        let text = "First {\"a\": 1} and second {\"b\": 2}";
        assert!(extract_json(text).is_err());
    }

    #[test]
    fn test_malformed_input_fails_with_readable_message() {
        let err = extract_json("not json at all").unwrap_err();
        let message = err.to_string();
        assert!(!message.is_empty());
        assert!(message.contains("unexpected format"));
        assert_eq!(err.candidate(), "not json at all");
    }

    #[test]
    fn test_empty_and_blank_input_fail() {
        assert!(extract_json("").is_err());
        assert!(extract_json("   \n\t ").is_err());
    }

    #[test]
    fn test_truncated_object_fails() {
        let text = r#"{"overallScore": 85, "strengths": ["Clear intro", "Good eye con"#;
        assert!(extract_json(text).is_err());

        let text = "```json\n{\"rootCause\": {\"diagnosis\": \"Low activ\n```";
        assert!(extract_json(text).is_err());
    }

    #[test]
    fn test_empty_fence_falls_back() {
        assert!(extract_json("``````").is_err());
        assert!(extract_json("```json```").is_err());
    }

    #[test]
    fn test_closing_bracket_before_opening_is_ignored() {
        assert_eq!(json_candidate("} nothing {", &ExtractOptions::default()), "} nothing {");
    }

    #[test]
    fn test_strict_mode_rejects_prose() {
        let text = "Sure! {\"a\": 1} Thanks.";
        assert!(extract_json_with(text, &ExtractOptions::strict()).is_err());
        assert_eq!(
            extract_json_with(text, &ExtractOptions::greedy()).unwrap(),
            json!({"a": 1})
        );
        assert_eq!(
            extract_json_with("```json\n{\"a\": 1}\n```", &ExtractOptions::strict()).unwrap(),
            json!({"a": 1})
        );
    }

    #[test]
    fn test_extract_json_as_typed() {
        #[derive(serde::Deserialize)]
        struct Score {
            score: u32,
        }
        let greedy = ExtractOptions::default();
        let score: Score = extract_json_as("Here: {\"score\": 9}", &greedy).unwrap();
        assert_eq!(score.score, 9);
        assert!(extract_json_as::<Score>("{\"other\": 1}", &greedy).is_err());
        assert!(extract_json_as::<Score>("Here: {\"score\": 9}", &ExtractOptions::strict()).is_err());
    }
}
