//! News Explainer

use super::{FeatureKind, FeatureRequest, require_text};
use crate::core::error::DomainError;
use crate::prompt::PromptTemplate;
use crate::response::structured::{Clarification, Discriminant, StructuredPayload};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsRequest {
    pub headline: String,
    pub url: String,
}

impl NewsRequest {
    pub fn new(headline: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            headline: headline.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsExplanation {
    pub what_happened: String,
    #[serde(default)]
    pub why_it_matters: String,
    #[serde(default)]
    pub what_you_can_learn: Vec<String>,
}

impl StructuredPayload for NewsExplanation {
    const NAME: &'static str = "NewsExplanation";
    const DISCRIMINANT: Discriminant = Discriminant::Field("whatHappened");
}

const STRUCTURE: &str = r#"{
  "whatHappened": "A brief, one-sentence summary of the core event. E.g., 'An AgriTech startup just raised $2M to expand its smart farming tools.'",
  "whyItMatters": "Explain the significance for the Indian startup ecosystem or for student founders.",
  "whatYouCanLearn": [
    "A takeaway or lesson.",
    "Another takeaway."
  ]
}"#;

impl FeatureRequest for NewsRequest {
    type Payload = NewsExplanation;
    const KIND: FeatureKind = FeatureKind::NewsExplainer;

    fn precheck(&self) -> Result<Option<Clarification>, DomainError> {
        require_text("headline", &self.headline)?;
        Ok(None)
    }

    fn prompt(&self) -> String {
        format!(
            r#"{persona} Your goal is to explain a news article in a simple, insightful way for a student audience.

Here is the article headline and URL:
- Headline: "{headline}"
- URL: "{url}"

Focus on actionable takeaways.

{contract}

{fallback}"#,
            persona = PromptTemplate::persona("an expert startup analyst", "encouraging"),
            headline = self.headline.trim(),
            url = self.url.trim(),
            contract = PromptTemplate::json_contract(STRUCTURE),
            fallback = PromptTemplate::clarification_fallback(
                "the article content cannot be accessed or understood",
                "Could not access the article content. The headline suggests it's about a specific topic, but more context is needed."
            ),
        )
    }
}
