//! Pitch Generator: names, one-liner, ten-slide deck, video script and launch post.

use super::FeatureKind;
use super::FeatureRequest;
use crate::community::StartupProfile;
use crate::core::error::DomainError;
use crate::prompt::PromptTemplate;
use crate::response::structured::{Clarification, Discriminant, StructuredPayload};
use serde::{Deserialize, Serialize};

/// Pitch generation runs straight off the founder's startup profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchRequest {
    pub startup: StartupProfile,
}

impl PitchRequest {
    pub fn new(startup: StartupProfile) -> Self {
        Self { startup }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NameSuggestion {
    pub name: String,
    pub rationale: String,
    pub domains: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PitchDeckSlide {
    pub title: String,
    pub content: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchPackage {
    pub pitch_deck: Vec<PitchDeckSlide>,
    #[serde(default)]
    pub name_suggestions: Vec<NameSuggestion>,
    #[serde(default)]
    pub one_liner: String,
    #[serde(default)]
    pub elevator_pitch: String,
    #[serde(default)]
    pub video_script: String,
    #[serde(default, rename = "linkedInPost")]
    pub linkedin_post: String,
}

impl StructuredPayload for PitchPackage {
    const NAME: &'static str = "PitchPackage";
    const DISCRIMINANT: Discriminant = Discriminant::Field("pitchDeck");
}

/// The ten slides every generated deck covers, in order.
pub const DECK_SLIDES: [&str; 10] = [
    "The Problem",
    "The Solution",
    "Market Opportunity",
    "The Product",
    "Business Model",
    "Traction & Roadmap",
    "Competitor Comparison",
    "Go-to-Market Strategy",
    "The Team",
    "The Ask",
];

fn structure(startup: &StartupProfile) -> String {
    let slides = DECK_SLIDES
        .iter()
        .enumerate()
        .map(|(i, title)| format!(r#"    {{ "title": "{}. {}", "content": ["...", "...", "..."] }}"#, i + 1, title))
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        r#"{{
  "nameSuggestions": [
    {{ "name": "StartupName1", "rationale": "Why this name works.", "domains": ["name1.in", "name1.ai"] }}
  ],
  "oneLiner": "A clear, powerful one-liner based on the startup's profile. E.g., '{one_liner}'",
  "elevatorPitch": "A compelling 60-second elevator pitch.",
  "pitchDeck": [
{slides}
  ],
  "videoScript": "A 60-second, first-person video script for a pitch competition or reel. Start with a hook.",
  "linkedInPost": "A bold, engaging LinkedIn post draft announcing the project, with a hook, a brief story, a call to action and hashtags like #BuildingInPublic #IndianStartup."
}}"#,
        one_liner = startup.one_liner,
    )
}

impl FeatureRequest for PitchRequest {
    type Payload = PitchPackage;
    const KIND: FeatureKind = FeatureKind::Pitch;

    fn precheck(&self) -> Result<Option<Clarification>, DomainError> {
        super::require_text("startup name", &self.startup.name)?;
        Ok(None)
    }

    fn prompt(&self) -> String {
        let s = &self.startup;
        format!(
            r#"{persona}

A student has a startup idea, detailed in their profile:
- Startup Name: "{name}"
- One-Liner: "{one_liner}"
- Target User: "{audience}"
- Industry: "{domain}"
- Stage: "{stage}"
- Team: "{team}"

Generate a complete, investor-ready pitch package based on this profile. The content should be professional, compelling, and follow proven templates from accelerators like YC and Sequoia. Slide 6 must reflect the current stage ("{stage}") and slide 9 the team ("{team}").

{contract}

{fallback}"#,
            persona = PromptTemplate::persona(
                "a world-class startup advisor and pitch deck expert",
                "sharp, insightful, and encouraging"
            ),
            name = s.name,
            one_liner = s.one_liner,
            audience = s.target_audience,
            domain = s.domain,
            stage = s.stage,
            team = s.team_members,
            contract = PromptTemplate::json_contract(&structure(s)),
            fallback = PromptTemplate::clarification_fallback(
                "the user's idea is too vague",
                "That's a great starting point! To create a strong pitch, could you tell me more about the specific problem you're solving for these users?"
            ),
        )
    }
}
