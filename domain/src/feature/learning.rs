//! Learning Path: a four-week roadmap with videos, crash courses and case studies.

use super::{FeatureKind, FeatureRequest, require_text};
use crate::core::error::DomainError;
use crate::prompt::PromptTemplate;
use crate::response::structured::{Clarification, Discriminant, StructuredPayload};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPathRequest {
    pub idea: String,
    pub domain: String,
}

impl LearningPathRequest {
    pub fn new(idea: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            idea: idea.into(),
            domain: domain.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoRecommendation {
    pub title: String,
    pub url: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CrashCourse {
    pub tool: String,
    pub reason: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaseStudy {
    pub startup_name: String,
    pub summary: String,
    pub key_takeaways: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoadmapWeek {
    pub week: u32,
    pub title: String,
    pub tasks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPath {
    pub roadmap: Vec<RoadmapWeek>,
    #[serde(default)]
    pub youtube_playlist: Vec<VideoRecommendation>,
    #[serde(default)]
    pub tech_stack_crash_course: Vec<CrashCourse>,
    #[serde(default)]
    pub case_studies: Vec<CaseStudy>,
}

impl LearningPath {
    /// Total number of tasks across all weeks
    pub fn task_count(&self) -> usize {
        self.roadmap.iter().map(|w| w.tasks.len()).sum()
    }
}

impl StructuredPayload for LearningPath {
    const NAME: &'static str = "LearningPath";
    const DISCRIMINANT: Discriminant = Discriminant::Field("roadmap");
}

const STRUCTURE: &str = r#"{
  "youtubePlaylist": [{ "title": "...", "url": "https://www.youtube.com/watch?v=...", "description": "..." }],
  "techStackCrashCourse": [{ "tool": "...", "reason": "...", "url": "..." }],
  "caseStudies": [{ "startupName": "...", "summary": "...", "keyTakeaways": ["...", "..."] }],
  "roadmap": [
    { "week": 1, "title": "...", "tasks": ["...", "..."] },
    { "week": 2, "title": "...", "tasks": ["...", "..."] },
    { "week": 3, "title": "...", "tasks": ["...", "..."] },
    { "week": 4, "title": "...", "tasks": ["...", "..."] }
  ]
}"#;

impl FeatureRequest for LearningPathRequest {
    type Payload = LearningPath;
    const KIND: FeatureKind = FeatureKind::LearningPath;

    fn precheck(&self) -> Result<Option<Clarification>, DomainError> {
        require_text("idea", &self.idea)?;
        Ok(None)
    }

    fn prompt(&self) -> String {
        let domain = if self.domain.trim().is_empty() {
            "General"
        } else {
            self.domain.trim()
        };
        format!(
            r#"{persona}

A student wants to build: "{idea}"
Their chosen domain is: "{domain}"

Create a personalised four-week learning path that takes them from zero to a working MVP. Recommend 3-4 real YouTube videos, a crash course for each key tool in the stack, and 2 case studies of Indian or global startups in the same domain.

{contract}

{fallback}"#,
            persona = PromptTemplate::persona(
                "an expert curriculum designer and startup mentor",
                "practical and motivating"
            ),
            idea = self.idea.trim(),
            contract = PromptTemplate::json_contract(STRUCTURE),
            fallback = PromptTemplate::clarification_fallback(
                "the idea is too vague to plan a learning path for",
                "What will the first version of your product let a user do?"
            ),
        )
    }
}
