//! Project Builder: turn a raw idea into an MVP blueprint plus teammate matches.

use super::{FeatureKind, FeatureRequest, require_text};
use crate::core::error::DomainError;
use crate::prompt::PromptTemplate;
use crate::response::structured::{Clarification, Discriminant, StructuredPayload};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectIdea {
    pub idea: String,
}

impl ProjectIdea {
    pub fn new(idea: impl Into<String>) -> Self {
        Self { idea: idea.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProblemUnderstanding {
    pub rephrased: String,
    pub target_audience: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuggestedMvp {
    pub description: String,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToolRecommendation {
    pub name: String,
    pub tool: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TechStack {
    pub description: String,
    pub recommendations: Vec<ToolRecommendation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CodeSnippet {
    pub title: String,
    pub language: String,
    pub code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelIntegration {
    pub suggestion: String,
    pub api_endpoint: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LearningResource {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentBlueprint {
    pub title: String,
    pub tagline: String,
}

/// A suggested teammate ("CollabMatch")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollaboratorProfile {
    pub name: String,
    pub leap_score: f64,
    pub location: String,
    pub match_type: String,
    pub match_reason: String,
    pub top_skills: Vec<String>,
    pub icebreaker: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPlan {
    pub problem_understanding: ProblemUnderstanding,
    #[serde(default)]
    pub suggested_mvp: SuggestedMvp,
    /// Mermaid `graph TD;` source
    #[serde(default)]
    pub mvp_flowchart: String,
    #[serde(default)]
    pub tech_stack: TechStack,
    #[serde(default)]
    pub code_snippet: CodeSnippet,
    #[serde(default, rename = "geminiIntegration")]
    pub model_integration: ModelIntegration,
    #[serde(default)]
    pub learning_resources: Vec<LearningResource>,
    #[serde(default)]
    pub student_blueprint: StudentBlueprint,
    #[serde(default)]
    pub collaborator_matches: Vec<CollaboratorProfile>,
}

impl StructuredPayload for ProjectPlan {
    const NAME: &'static str = "ProjectPlan";
    const DISCRIMINANT: Discriminant = Discriminant::Field("problemUnderstanding");
}

const STRUCTURE: &str = r#"{
  "problemUnderstanding": { "rephrased": "...", "targetAudience": "..." },
  "suggestedMvp": { "description": "...", "features": ["...", "...", "..."] },
  "mvpFlowchart": "A simple Mermaid syntax flowchart using 'graph TD;'. Any node text containing special characters like parentheses () or brackets [] MUST be enclosed in double quotes.",
  "techStack": { "description": "...", "recommendations": [{ "name": "...", "tool": "...", "reason": "..." }] },
  "codeSnippet": { "title": "...", "language": "...", "code": "..." },
  "geminiIntegration": { "suggestion": "...", "apiEndpoint": "..." },
  "learningResources": [{ "title": "...", "url": "..." }],
  "studentBlueprint": { "title": "...", "tagline": "..." },
  "collaboratorMatches": [{ "name": "...", "leapScore": 0, "location": "...", "matchType": "...", "matchReason": "...", "topSkills": ["..."], "icebreaker": "...", "avatarUrl": "https://api.dicebear.com/8.x/adventurer/svg?seed=Rohan" }]
}"#;

impl FeatureRequest for ProjectIdea {
    type Payload = ProjectPlan;
    const KIND: FeatureKind = FeatureKind::ProjectPlan;

    fn precheck(&self) -> Result<Option<Clarification>, DomainError> {
        require_text("idea", &self.idea)?;
        Ok(None)
    }

    fn prompt(&self) -> String {
        format!(
            r#"{persona} A student has provided an idea: "{idea}"

First, generate a complete project plan. Then, act as CollabMatch, an AI teammate matcher: based on the project, generate 2-3 fictional but realistic student builder profiles from a diverse pool in India who would be excellent collaborators. Ensure skill complementarity.

{contract}

{fallback}"#,
            persona = PromptTemplate::persona(
                "an AI-Powered Project Builder for students aged 15-24",
                "beginner-friendly and encouraging"
            ),
            idea = self.idea.trim(),
            contract = PromptTemplate::json_contract(STRUCTURE),
            fallback = PromptTemplate::clarification_fallback(
                "the user's idea is too vague",
                "A friendly, gentle question to help the user clarify their idea."
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::structured::classify;
    use serde_json::json;

    #[test]
    fn test_prompt_embeds_idea() {
        let prompt = ProjectIdea::new("  An app to split hostel mess bills ").prompt();
        assert!(prompt.contains("\"An app to split hostel mess bills\""));
        assert!(prompt.contains("collaboratorMatches"));
        assert!(prompt.contains("clarificationNeeded"));
    }

    #[test]
    fn test_blank_idea_is_rejected() {
        assert!(ProjectIdea::new("   ").precheck().is_err());
        assert_eq!(ProjectIdea::new("Notes app").precheck().unwrap(), None);
    }

    #[test]
    fn test_partial_plan_classifies_as_success() {
        let value = json!({
            "problemUnderstanding": { "rephrased": "Split bills", "targetAudience": "Hostel students" },
            "mvpFlowchart": "graph TD; A-->B;",
            "geminiIntegration": { "suggestion": "Categorise expenses", "apiEndpoint": "generateContent" },
            "collaboratorMatches": [{ "name": "Rohan", "leapScore": 87, "topSkills": ["Flutter"] }]
        });
        let plan = classify::<ProjectPlan>(value).unwrap().into_success().unwrap();
        assert_eq!(plan.problem_understanding.target_audience, "Hostel students");
        assert_eq!(plan.model_integration.api_endpoint, "generateContent");
        assert_eq!(plan.collaborator_matches[0].leap_score, 87.0);
        assert!(plan.learning_resources.is_empty());
    }
}
