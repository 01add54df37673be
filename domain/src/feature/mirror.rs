//! Startup Mirror: private weekly reflection with burnout analysis and a lesson.

use super::{FeatureKind, FeatureRequest};
use crate::community::StartupProfile;
use crate::core::error::DomainError;
use crate::prompt::PromptTemplate;
use crate::response::structured::{Clarification, Discriminant, StructuredPayload};
use serde::{Deserialize, Serialize};

/// The founder's answers to the three weekly questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FounderCheckin {
    pub went_wrong: String,
    pub biggest_blocker: String,
    pub system_to_fix: String,
}

impl FounderCheckin {
    pub fn is_blank(&self) -> bool {
        [&self.went_wrong, &self.biggest_blocker, &self.system_to_fix]
            .iter()
            .all(|s| s.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReflectionRequest {
    pub checkin: FounderCheckin,
    pub startup: StartupProfile,
}

impl ReflectionRequest {
    pub fn new(checkin: FounderCheckin, startup: StartupProfile) -> Self {
        Self { checkin, startup }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MindfulnessExercise {
    pub title: String,
    pub description: String,
    /// "Breathing", "Journaling" or "Habit"
    #[serde(rename = "type")]
    pub exercise_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DelegationTemplate {
    pub title: String,
    /// Markdown
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FounderReflectionAnalysis {
    /// 0-100, higher means higher burnout risk
    pub burnout_score: f64,
    pub burnout_analysis: String,
    pub mindfulness_exercises: Vec<MindfulnessExercise>,
    pub delegation_templates: Vec<DelegationTemplate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FounderLesson {
    pub title: String,
    pub source: String,
    pub takeaways: Vec<String>,
    pub actionable_suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FounderReflection {
    pub analysis: FounderReflectionAnalysis,
    #[serde(default)]
    pub lesson: FounderLesson,
}

impl FounderReflection {
    /// Burnout score clamped into 0..=100.
    pub fn burnout_score(&self) -> u8 {
        self.analysis.burnout_score.clamp(0.0, 100.0).round() as u8
    }
}

impl StructuredPayload for FounderReflection {
    const NAME: &'static str = "FounderReflection";
    const DISCRIMINANT: Discriminant = Discriminant::Field("analysis");
}

const STRUCTURE: &str = r##"{
  "analysis": {
    "burnoutScore": 85,
    "burnoutAnalysis": "A short, empathetic paragraph (2-3 sentences) acknowledging their struggles without being patronizing.",
    "mindfulnessExercises": [
      { "title": "5-Minute Mindful Break", "description": "...", "type": "Breathing" }
    ],
    "delegationTemplates": [
      { "title": "Weekly Task Delegation SOP", "content": "# Task: [Task Name]\n## Owner: [Team Member]" }
    ]
  },
  "lesson": {
    "title": "A relevant case study title from a well-known startup.",
    "source": "e.g., 'First Round Review', 'YC Blog'",
    "takeaways": ["...", "..."],
    "actionableSuggestion": "A single, concrete suggestion for this founder based on their stage and the lesson."
  }
}"##;

impl FeatureRequest for ReflectionRequest {
    type Payload = FounderReflection;
    const KIND: FeatureKind = FeatureKind::StartupMirror;

    fn precheck(&self) -> Result<Option<Clarification>, DomainError> {
        if self.checkin.is_blank() {
            return Err(DomainError::InvalidInput(
                "answer at least one reflection question".to_string(),
            ));
        }
        Ok(None)
    }

    fn prompt(&self) -> String {
        let s = &self.startup;
        let c = &self.checkin;
        format!(
            r#"{persona} You are NOT a therapist, but a resilience coach.

A founder has submitted their weekly private reflection.
- Startup: "{name}" ({one_liner})
- Domain: {domain}
- Stage: {stage}

This week's reflection:
- What went wrong? "{went_wrong}"
- Biggest blocker? "{blocker}"
- One system to fix? "{system}"

Analyze this reflection and provide supportive, actionable feedback. Generate a realistic burnoutScore between 0 and 100 based on the tone, language and severity of the issues. High score = high burnout risk.

{contract}

{fallback}"#,
            persona = PromptTemplate::persona(
                "\"Startup Mirror\", a private, empathetic AI reflection partner",
                "wise, supportive, and non-judgmental"
            ),
            name = s.name,
            one_liner = s.one_liner,
            domain = s.domain,
            stage = s.stage,
            went_wrong = c.went_wrong.trim(),
            blocker = c.biggest_blocker.trim(),
            system = c.system_to_fix.trim(),
            contract = PromptTemplate::json_contract(STRUCTURE),
            fallback = PromptTemplate::clarification_fallback(
                "the reflection is too short to analyze",
                "Could you share a little more about what made this week hard?"
            ),
        )
    }
}
