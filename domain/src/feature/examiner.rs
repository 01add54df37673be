//! AI Examiner: scores a mock investor interview from its transcript and
//! optional webcam snapshots.

use super::{Attachment, FeatureKind, FeatureRequest};
use crate::core::error::DomainError;
use crate::prompt::PromptTemplate;
use crate::response::structured::{Clarification, Discriminant, StructuredPayload};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptLine {
    pub speaker: String,
    pub text: String,
}

impl TranscriptLine {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationRequest {
    pub transcript: Vec<TranscriptLine>,
    /// Snapshots taken during the interview
    pub snapshots: Vec<Attachment>,
}

impl EvaluationRequest {
    pub fn new(transcript: Vec<TranscriptLine>) -> Self {
        Self {
            transcript,
            snapshots: Vec::new(),
        }
    }

    pub fn with_snapshot(mut self, snapshot: Attachment) -> Self {
        self.snapshots.push(snapshot);
        self
    }

    fn rendered_transcript(&self) -> String {
        self.transcript
            .iter()
            .map(|line| format!("{}: {}", line.speaker, line.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImprovementArea {
    pub area: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuggestedResource {
    pub title: String,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    /// 0-100
    pub overall_score: f64,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub areas_for_improvement: Vec<ImprovementArea>,
    #[serde(default)]
    pub suggested_resources: Vec<SuggestedResource>,
}

impl StructuredPayload for Evaluation {
    const NAME: &'static str = "Evaluation";
    const DISCRIMINANT: Discriminant = Discriminant::Field("overallScore");
}

const STRUCTURE: &str = r#"{
  "overallScore": 85,
  "strengths": ["A clear and concise introduction.", "Good articulation of the problem statement."],
  "areasForImprovement": [
    { "area": "Market Sizing", "suggestion": "Provide specific data (TAM, SAM, SOM) to back up market claims." }
  ],
  "suggestedResources": [
    { "title": "How to Pitch a Company | Y Combinator", "description": "...", "url": "https://www.youtube.com/..." }
  ]
}"#;

impl FeatureRequest for EvaluationRequest {
    type Payload = Evaluation;
    const KIND: FeatureKind = FeatureKind::Examiner;

    fn precheck(&self) -> Result<Option<Clarification>, DomainError> {
        if self.transcript.iter().all(|line| line.text.trim().is_empty()) {
            return Err(DomainError::InvalidInput(
                "interview transcript is empty".to_string(),
            ));
        }
        Ok(None)
    }

    fn prompt(&self) -> String {
        let visual = if self.snapshots.is_empty() {
            ""
        } else {
            " Evaluate their confidence based on visual cues in the attached images."
        };
        format!(
            r#"{persona} You have just conducted a mock interview with a student founder.

Interview transcript:
{transcript}

Analyze the candidate's performance. Focus on the clarity of their idea, problem definition, solution, market awareness, and overall communication.{visual}

{contract}

{fallback}"#,
            persona = PromptTemplate::persona("an experienced startup investor and examiner", "honest but constructive"),
            transcript = self.rendered_transcript(),
            contract = PromptTemplate::json_contract(STRUCTURE),
            fallback = PromptTemplate::clarification_fallback(
                "the transcript is too short or doesn't provide enough information for a meaningful evaluation",
                "The interview transcript is too short to provide a detailed evaluation. Please complete a full interview."
            ),
        )
    }

    fn attachments(&self) -> &[Attachment] {
        &self.snapshots
    }
}
