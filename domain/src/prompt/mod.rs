//! Shared prompt fragments.
//!
//! Each feature module builds its own prompt; the pieces every prompt ends
//! with (the JSON-only contract and the clarification fallback) live here
//! so the wording stays identical across features.

use crate::response::structured::{CLARIFICATION_FIELD, KIND_CLARIFICATION, KIND_SUCCESS, KIND_TAG};

/// Fragments appended to every feature prompt
pub struct PromptTemplate;

impl PromptTemplate {
    /// Opening persona line shared by the LEAP tools
    pub fn persona(role: &str, tone: &str) -> String {
        format!(
            "You are {role} on LEAP, an AI platform for young Indian student founders. Your tone is {tone}."
        )
    }

    /// The JSON-only contract followed by the expected structure.
    ///
    /// `structure` is an annotated example of the success payload.
    pub fn json_contract(structure: &str) -> String {
        format!(
            r#"Your entire response MUST be a single, valid JSON object with no text outside of it. Add the field "{KIND_TAG}": "{KIND_SUCCESS}" to the top-level object. The JSON must follow this exact structure:

{structure}"#
        )
    }

    /// Same as [`Self::json_contract`] for payloads that are a top-level array.
    ///
    /// Arrays cannot carry the `kind` tag; only the clarification object does.
    pub fn json_array_contract(element: &str) -> String {
        format!(
            r#"Your entire response MUST be a single, valid JSON array with no text outside of it. Each element of the array must follow this exact structure:

{element}"#
        )
    }

    /// The fallback shape the model should use when the input is too vague.
    pub fn clarification_fallback(condition: &str, example_question: &str) -> String {
        format!(
            r#"If {condition}, instead return a JSON object with this structure:
{{ "{KIND_TAG}": "{KIND_CLARIFICATION}", "{CLARIFICATION_FIELD}": "{example_question}" }}"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_contract_requests_kind_tag() {
        let contract = PromptTemplate::json_contract("{ \"a\": 1 }");
        assert!(contract.contains("\"kind\": \"success\""));
        assert!(contract.ends_with("{ \"a\": 1 }"));
    }

    #[test]
    fn test_clarification_fallback_shape() {
        let text = PromptTemplate::clarification_fallback("the idea is too vague", "What problem?");
        assert!(text.starts_with("If the idea is too vague"));
        assert!(text.contains(r#""kind": "clarification", "clarificationNeeded": "What problem?""#));
    }

    #[test]
    fn test_persona() {
        let line = PromptTemplate::persona("an expert mentor", "encouraging");
        assert!(line.starts_with("You are an expert mentor on LEAP"));
        assert!(line.ends_with("Your tone is encouraging."));
    }
}
