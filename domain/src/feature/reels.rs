//! Reels-to-Riches: one short-form content idea per selected platform.

use super::{FeatureKind, FeatureRequest, require_text};
use crate::core::error::DomainError;
use crate::core::string::quoted_list;
use crate::prompt::PromptTemplate;
use crate::response::structured::{Clarification, Discriminant, StructuredPayload};
use serde::{Deserialize, Serialize};

/// Returned without calling the model when no platform was picked.
pub const NO_PLATFORM_QUESTION: &str = "Please select at least one platform to generate content for!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReelsRequest {
    pub startup_name: String,
    pub domain: String,
    pub stage: String,
    /// e.g. "Instagram Reels", "YouTube Shorts", "LinkedIn"
    pub platforms: Vec<String>,
    pub language: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdeaOutline {
    pub hook: String,
    pub purpose: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Script {
    pub short_caption: String,
    pub long_description: String,
    pub hashtags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AudioSuggestion {
    pub recommendation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Storyboard {
    pub scenes: Vec<String>,
    pub moodboard: String,
    pub transitions: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CallToAction {
    pub suggestion: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentIdea {
    pub platform: String,
    pub idea: IdeaOutline,
    pub script: Script,
    pub audio: AudioSuggestion,
    pub storyboard: Storyboard,
    pub cta: CallToAction,
}

/// The success payload is a bare JSON array of ideas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReelsContent(pub Vec<ContentIdea>);

impl ReelsContent {
    pub fn ideas(&self) -> &[ContentIdea] {
        &self.0
    }
}

impl StructuredPayload for ReelsContent {
    const NAME: &'static str = "ReelsContent";
    const DISCRIMINANT: Discriminant = Discriminant::Array;
}

const ELEMENT: &str = r##"{
  "platform": "The platform this idea is for",
  "idea": { "hook": "A scroll-stopping first line", "purpose": "Awareness, education or conversion", "title": "..." },
  "script": { "shortCaption": "...", "longDescription": "...", "hashtags": ["#...", "#..."] },
  "audio": { "recommendation": "A trending audio or music style" },
  "storyboard": { "scenes": ["Scene 1: ...", "Scene 2: ..."], "moodboard": "...", "transitions": "..." },
  "cta": { "suggestion": "..." }
}"##;

impl FeatureRequest for ReelsRequest {
    type Payload = ReelsContent;
    const KIND: FeatureKind = FeatureKind::Reels;

    fn precheck(&self) -> Result<Option<Clarification>, DomainError> {
        if self.platforms.iter().all(|p| p.trim().is_empty()) {
            return Ok(Some(Clarification::new(NO_PLATFORM_QUESTION)));
        }
        require_text("startup name", &self.startup_name)?;
        Ok(None)
    }

    fn prompt(&self) -> String {
        let platforms: Vec<&str> = self
            .platforms
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect();
        let language = if self.language.trim().is_empty() {
            "English"
        } else {
            self.language.trim()
        };

        format!(
            r#"{persona}

Startup: "{name}"
Domain: "{domain}"
Stage: "{stage}"
Platforms: {platforms}
Language: {language}

Generate exactly one short-form content idea for EACH of the platforms above, tailored to that platform's format and audience. Write captions and scripts in {language}.

{contract}

{fallback}"#,
            persona = PromptTemplate::persona(
                "a viral content strategist for Indian startups",
                "energetic and trend-aware"
            ),
            name = self.startup_name.trim(),
            domain = self.domain,
            stage = self.stage,
            platforms = quoted_list(&platforms),
            contract = PromptTemplate::json_array_contract(ELEMENT),
            fallback = PromptTemplate::clarification_fallback(
                "the startup description is too vague to make content about",
                "What does your startup do, in one sentence?"
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::structured::{StructuredResult, classify};
    use serde_json::json;

    fn request(platforms: &[&str]) -> ReelsRequest {
        ReelsRequest {
            startup_name: "Attend.ly".to_string(),
            domain: "EdTech".to_string(),
            stage: "MVP".to_string(),
            platforms: platforms.iter().map(|p| p.to_string()).collect(),
            language: String::new(),
        }
    }

    #[test]
    fn test_empty_platforms_short_circuit() {
        let result = request(&[]).precheck().unwrap();
        assert_eq!(result, Some(Clarification::new(NO_PLATFORM_QUESTION)));

        let result = request(&["  "]).precheck().unwrap();
        assert!(result.is_some());
    }

    #[test]
    fn test_prompt_lists_platforms() {
        let prompt = request(&["Instagram Reels", "LinkedIn"]).prompt();
        assert!(prompt.contains("Platforms: \"Instagram Reels\", \"LinkedIn\""));
        assert!(prompt.contains("Language: English"));
        assert!(prompt.contains("valid JSON array"));
        assert!(prompt.contains(r##""hashtags": ["#...", "#..."]"##));
    }

    #[test]
    fn test_array_classifies_as_success() {
        let value = json!([
            { "platform": "LinkedIn", "idea": { "hook": "Attendance is broken" } },
            { "platform": "YouTube Shorts" }
        ]);
        let content = classify::<ReelsContent>(value).unwrap().into_success().unwrap();
        assert_eq!(content.ideas().len(), 2);
        assert_eq!(content.ideas()[0].idea.hook, "Attendance is broken");
    }

    #[test]
    fn test_object_with_question_is_clarification() {
        let value = json!({ "clarificationNeeded": "What does it do?" });
        let result = classify::<ReelsContent>(value).unwrap();
        assert!(matches!(result, StructuredResult::Clarification(_)));
    }
}
