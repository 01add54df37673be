//! Discriminated classification of parsed model output.
//!
//! Every feature answers with one of two shapes: its own payload, or a
//! single-field `{"clarificationNeeded": "..."}` object asking the user for
//! more detail. Prompts ask the model to add a reserved `kind` tag
//! (`"success"` / `"clarification"`); when the tag is there it decides.
//! Otherwise the success shape is recognised by the *presence* of a field
//! only that payload carries. The absence of `clarificationNeeded` is never
//! taken as evidence of success.

use super::error::{ResponseError, ShapeMismatch};
use super::extract::{ExtractOptions, extract_json_with};
use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

/// Reserved discriminant field name.
pub const KIND_TAG: &str = "kind";
/// `kind` value of the success variant.
pub const KIND_SUCCESS: &str = "success";
/// `kind` value of the clarification variant.
pub const KIND_CLARIFICATION: &str = "clarification";
/// Field carrying the follow-up question of the clarification variant.
pub const CLARIFICATION_FIELD: &str = "clarificationNeeded";

/// How the success variant of a payload is recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discriminant {
    /// A field that every successful payload carries and a clarification never does.
    Field(&'static str),
    /// The successful payload is a top-level JSON array.
    Array,
}

/// A feature payload that can be told apart from a clarification request.
pub trait StructuredPayload: DeserializeOwned {
    /// Human-readable name used in diagnostics
    const NAME: &'static str;

    /// Success-only marker of this payload
    const DISCRIMINANT: Discriminant;
}

/// The fallback shape: the model needs more input from the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clarification {
    #[serde(rename = "clarificationNeeded")]
    pub question: String,
}

impl Clarification {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
        }
    }
}

/// Exactly one of the two shapes a feature can answer with.
///
/// Serializes as `{"kind": "success", "payload": ...}` or
/// `{"kind": "clarification", "clarificationNeeded": "..."}`.
#[derive(Debug, Clone, PartialEq)]
pub enum StructuredResult<T> {
    Success(T),
    Clarification(Clarification),
}

impl<T: Serialize> Serialize for StructuredResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        match self {
            StructuredResult::Success(payload) => {
                map.serialize_entry(KIND_TAG, KIND_SUCCESS)?;
                map.serialize_entry("payload", payload)?;
            }
            StructuredResult::Clarification(c) => {
                map.serialize_entry(KIND_TAG, KIND_CLARIFICATION)?;
                map.serialize_entry(CLARIFICATION_FIELD, &c.question)?;
            }
        }
        map.end()
    }
}

impl<T> StructuredResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, StructuredResult::Success(_))
    }

    pub fn is_clarification(&self) -> bool {
        matches!(self, StructuredResult::Clarification(_))
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            StructuredResult::Success(payload) => Some(payload),
            StructuredResult::Clarification(_) => None,
        }
    }

    pub fn clarification(&self) -> Option<&Clarification> {
        match self {
            StructuredResult::Success(_) => None,
            StructuredResult::Clarification(c) => Some(c),
        }
    }

    pub fn into_success(self) -> Option<T> {
        match self {
            StructuredResult::Success(payload) => Some(payload),
            StructuredResult::Clarification(_) => None,
        }
    }
}

/// The reserved tag, if the value carries one of its two legal values.
fn kind_tag(value: &Value) -> Option<&str> {
    value
        .get(KIND_TAG)
        .and_then(Value::as_str)
        .filter(|kind| *kind == KIND_SUCCESS || *kind == KIND_CLARIFICATION)
}

fn has_discriminant<T: StructuredPayload>(value: &Value) -> bool {
    match T::DISCRIMINANT {
        Discriminant::Field(field) => value.get(field).is_some_and(|v| !v.is_null()),
        Discriminant::Array => value.is_array(),
    }
}

/// Type guard: is `value` the success variant of `T`?
pub fn is_success_variant<T: StructuredPayload>(value: &Value) -> bool {
    match kind_tag(value) {
        Some(kind) => kind == KIND_SUCCESS,
        None => has_discriminant::<T>(value),
    }
}

/// Type guard: is `value` the clarification variant for `T`'s feature?
///
/// Never true when [`is_success_variant`] is.
pub fn is_clarification_variant<T: StructuredPayload>(value: &Value) -> bool {
    match kind_tag(value) {
        Some(kind) => kind == KIND_CLARIFICATION,
        None => {
            !has_discriminant::<T>(value)
                && value.get(CLARIFICATION_FIELD).is_some_and(Value::is_string)
        }
    }
}

/// Classify a parsed value into one of the two variants.
///
/// A value that passes the success guard but does not deserialize into `T`
/// is a [`ShapeMismatch`], as is a value that passes neither guard.
pub fn classify<T: StructuredPayload>(value: Value) -> Result<StructuredResult<T>, ShapeMismatch> {
    if is_success_variant::<T>(&value) {
        return serde_json::from_value::<T>(value)
            .map(StructuredResult::Success)
            .map_err(|e| ShapeMismatch::new(T::NAME, e.to_string()));
    }

    if is_clarification_variant::<T>(&value) {
        return match value.get(CLARIFICATION_FIELD).and_then(Value::as_str) {
            Some(question) => Ok(StructuredResult::Clarification(Clarification::new(question))),
            None => Err(ShapeMismatch::new(
                T::NAME,
                "clarification tag without a clarificationNeeded question",
            )),
        };
    }

    debug!(payload = T::NAME, "Response matched neither variant");
    Err(ShapeMismatch::new(
        T::NAME,
        "response matched neither the success nor the clarification shape",
    ))
}

/// Extract JSON from raw model text and classify it.
pub fn parse_structured<T: StructuredPayload>(
    text: &str,
    options: &ExtractOptions,
) -> Result<StructuredResult<T>, ResponseError> {
    let value = extract_json_with(text, options)?;
    Ok(classify(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Evaluation {
        overall_score: u32,
        strengths: Vec<String>,
    }

    impl StructuredPayload for Evaluation {
        const NAME: &'static str = "Evaluation";
        const DISCRIMINANT: Discriminant = Discriminant::Field("overallScore");
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Idea {
        platform: String,
    }

    impl StructuredPayload for Vec<Idea> {
        const NAME: &'static str = "IdeaList";
        const DISCRIMINANT: Discriminant = Discriminant::Array;
    }

    #[test]
    fn test_fenced_clarification() {
        let text = "```json\n{\"clarificationNeeded\":\"Can you clarify the target audience?\"}\n```";
        let value = super::super::extract::extract_json(text).unwrap();
        assert_eq!(
            value,
            json!({"clarificationNeeded": "Can you clarify the target audience?"})
        );
        assert!(is_clarification_variant::<Evaluation>(&value));
        assert!(!is_success_variant::<Evaluation>(&value));

        let result = parse_structured::<Evaluation>(text, &ExtractOptions::default()).unwrap();
        assert_eq!(
            result.clarification().map(|c| c.question.as_str()),
            Some("Can you clarify the target audience?")
        );
    }

    #[test]
    fn test_unfenced_success() {
        let text = r#"{"overallScore": 85, "strengths": ["Clear intro"], "areasForImprovement": [], "suggestedResources": []}"#;
        let value = super::super::extract::extract_json(text).unwrap();
        assert!(is_success_variant::<Evaluation>(&value));
        assert!(!is_clarification_variant::<Evaluation>(&value));

        let result = classify::<Evaluation>(value).unwrap();
        assert_eq!(
            result.into_success(),
            Some(Evaluation {
                overall_score: 85,
                strengths: vec!["Clear intro".to_string()],
            })
        );
    }

    #[test]
    fn test_guards_are_mutually_exclusive() {
        let values = [
            json!({"overallScore": 1, "strengths": []}),
            json!({"clarificationNeeded": "More?"}),
            json!({"overallScore": 1, "clarificationNeeded": "Both?"}),
            json!({"kind": "success", "clarificationNeeded": "tagged"}),
            json!({"kind": "clarification", "overallScore": 3}),
            json!({"kind": "other", "overallScore": 3}),
            json!({"overallScore": null, "clarificationNeeded": "null score"}),
            json!([]),
            json!("plain string"),
            json!(null),
        ];
        for v in &values {
            assert!(
                !(is_success_variant::<Evaluation>(v) && is_clarification_variant::<Evaluation>(v)),
                "guards overlap on {v}"
            );
        }
    }

    #[test]
    fn test_kind_tag_overrides_presence() {
        let value = json!({"kind": "clarification", "overallScore": 3, "clarificationNeeded": "Which round?"});
        assert!(!is_success_variant::<Evaluation>(&value));
        assert!(classify::<Evaluation>(value).unwrap().is_clarification());

        let value = json!({"kind": "success", "overallScore": 3, "strengths": []});
        assert!(classify::<Evaluation>(value).unwrap().is_success());
    }

    #[test]
    fn test_unknown_kind_falls_back_to_presence() {
        let value = json!({"kind": "report", "overallScore": 3, "strengths": []});
        assert!(is_success_variant::<Evaluation>(&value));
    }

    #[test]
    fn test_null_discriminant_is_not_success() {
        let value = json!({"overallScore": null, "clarificationNeeded": "Please finish the interview."});
        assert!(!is_success_variant::<Evaluation>(&value));
        assert!(classify::<Evaluation>(value).unwrap().is_clarification());
    }

    #[test]
    fn test_neither_shape_is_mismatch() {
        let err = classify::<Evaluation>(json!({"score": 85})).unwrap_err();
        assert_eq!(err.feature(), "Evaluation");
        let err = classify::<Evaluation>(json!({"clarificationNeeded": 42})).unwrap_err();
        assert_eq!(err.feature(), "Evaluation");
    }

    #[test]
    fn test_incomplete_success_is_mismatch_not_clarification() {
        let err = classify::<Evaluation>(json!({"overallScore": 85})).unwrap_err();
        assert!(err.detail().contains("strengths"));
    }

    #[test]
    fn test_tagged_clarification_without_question_is_mismatch() {
        assert!(classify::<Evaluation>(json!({"kind": "clarification"})).is_err());
    }

    #[test]
    fn test_array_discriminant() {
        let value = json!([{"platform": "LinkedIn"}]);
        assert!(is_success_variant::<Vec<Idea>>(&value));
        let result = classify::<Vec<Idea>>(value).unwrap();
        assert_eq!(result.success().map(Vec::len), Some(1));

        let value = json!({"clarificationNeeded": "Which platform?"});
        assert!(!is_success_variant::<Vec<Idea>>(&value));
        assert!(classify::<Vec<Idea>>(value).unwrap().is_clarification());
    }

    #[test]
    fn test_parse_structured_reports_format_errors() {
        let err = parse_structured::<Evaluation>("{\"overallScore\": 8", &ExtractOptions::default())
            .unwrap_err();
        assert!(matches!(err, ResponseError::Format(_)));
    }

    #[test]
    fn test_structured_result_serializes_with_kind() {
        let result: StructuredResult<Vec<u8>> = StructuredResult::Clarification(Clarification::new("Why?"));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, json!({"kind": "clarification", "clarificationNeeded": "Why?"}));

        let result: StructuredResult<Vec<u8>> = StructuredResult::Success(vec![1, 2]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, json!({"kind": "success", "payload": [1, 2]}));
    }
}
