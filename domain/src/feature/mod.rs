//! Feature catalog.
//!
//! Every LEAP tool is a [`FeatureRequest`]: an input that knows how to
//! render its prompt, which temperature to ask for, and which payload type
//! the answer must classify into.

pub mod compliance;
pub mod examiner;
pub mod fundraising;
pub mod growth;
pub mod learning;
pub mod mirror;
pub mod news;
pub mod pitch;
pub mod project;
pub mod reels;
pub mod solver;

use crate::core::error::DomainError;
use crate::response::structured::{Clarification, StructuredPayload};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The generation tools LEAP offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    ProjectPlan,
    Pitch,
    LearningPath,
    Reels,
    Compliance,
    NewsExplainer,
    GrowthDashboard,
    Examiner,
    StartupMirror,
    Fundraising,
    ProblemSolver,
}

impl FeatureKind {
    pub const ALL: [FeatureKind; 11] = [
        FeatureKind::ProjectPlan,
        FeatureKind::Pitch,
        FeatureKind::LearningPath,
        FeatureKind::Reels,
        FeatureKind::Compliance,
        FeatureKind::NewsExplainer,
        FeatureKind::GrowthDashboard,
        FeatureKind::Examiner,
        FeatureKind::StartupMirror,
        FeatureKind::Fundraising,
        FeatureKind::ProblemSolver,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKind::ProjectPlan => "project_plan",
            FeatureKind::Pitch => "pitch",
            FeatureKind::LearningPath => "learning_path",
            FeatureKind::Reels => "reels",
            FeatureKind::Compliance => "compliance",
            FeatureKind::NewsExplainer => "news_explainer",
            FeatureKind::GrowthDashboard => "growth_dashboard",
            FeatureKind::Examiner => "examiner",
            FeatureKind::StartupMirror => "startup_mirror",
            FeatureKind::Fundraising => "fundraising",
            FeatureKind::ProblemSolver => "problem_solver",
        }
    }

    /// Name shown to users
    pub fn display_name(&self) -> &'static str {
        match self {
            FeatureKind::ProjectPlan => "Project Builder",
            FeatureKind::Pitch => "Pitch Generator",
            FeatureKind::LearningPath => "Learning Path",
            FeatureKind::Reels => "Reels-to-Riches",
            FeatureKind::Compliance => "Startup Compliance",
            FeatureKind::NewsExplainer => "News Explainer",
            FeatureKind::GrowthDashboard => "Growth Dashboard",
            FeatureKind::Examiner => "AI Examiner",
            FeatureKind::StartupMirror => "Startup Mirror",
            FeatureKind::Fundraising => "Fundraising Co-pilot",
            FeatureKind::ProblemSolver => "Problem Solver",
        }
    }

    /// What the user sees when the model could not be reached
    pub fn gateway_error_message(&self) -> &'static str {
        match self {
            FeatureKind::ProjectPlan | FeatureKind::Pitch | FeatureKind::LearningPath => {
                "Failed to get a response from the AI. Please check your connection and API key."
            }
            FeatureKind::Reels => "Failed to get a response from the AI for Reels content. Please try again.",
            FeatureKind::Compliance => {
                "Failed to get a response from the AI for compliance documents. Please try again."
            }
            FeatureKind::NewsExplainer => {
                "Failed to get a summary from the AI. The article might be inaccessible or the service is busy."
            }
            FeatureKind::GrowthDashboard => {
                "Failed to get a response from the AI for the Growth Dashboard. Please try again."
            }
            FeatureKind::Examiner => "Failed to get a response from the AI for the evaluation. Please try again.",
            FeatureKind::StartupMirror => {
                "Failed to get a response from the AI for your reflection. Please try again."
            }
            FeatureKind::Fundraising => {
                "Failed to get a response from the AI for your fundraising analysis. Please try again."
            }
            FeatureKind::ProblemSolver => {
                "Failed to get a response from the AI for the Problem Solver. Please try again."
            }
        }
    }

    /// Sampling temperature requested from the model
    pub fn temperature(&self) -> f32 {
        match self {
            FeatureKind::NewsExplainer => 0.3,
            FeatureKind::Compliance => 0.4,
            FeatureKind::ProjectPlan | FeatureKind::LearningPath => 0.5,
            FeatureKind::Pitch | FeatureKind::Examiner | FeatureKind::Fundraising => 0.6,
            FeatureKind::Reels
            | FeatureKind::GrowthDashboard
            | FeatureKind::StartupMirror
            | FeatureKind::ProblemSolver => 0.7,
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FeatureKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        FeatureKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| DomainError::InvalidInput(format!("unknown feature: {s}")))
    }
}

/// Binary content sent alongside the prompt (e.g. interview snapshots).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl Attachment {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }
}

/// An input to one of the LEAP generation tools.
pub trait FeatureRequest: Send + Sync {
    /// The success shape this feature's answer classifies into
    type Payload: StructuredPayload + Serialize + Send;

    const KIND: FeatureKind;

    /// Render the natural-language prompt for this input.
    fn prompt(&self) -> String;

    /// Checks that run before any model call.
    ///
    /// `Ok(Some(_))` answers the request locally with a clarification;
    /// `Err(_)` rejects the input outright.
    fn precheck(&self) -> Result<Option<Clarification>, DomainError> {
        Ok(None)
    }

    fn temperature(&self) -> f32 {
        Self::KIND.temperature()
    }

    fn attachments(&self) -> &[Attachment] {
        &[]
    }
}

/// Reject blank required text fields.
pub(crate) fn require_text(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        Err(DomainError::InvalidInput(format!("{field} cannot be empty")))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_kind_roundtrip() {
        for kind in FeatureKind::ALL {
            assert_eq!(kind.as_str().parse::<FeatureKind>().unwrap(), kind);
        }
        assert_eq!("Problem-Solver".parse::<FeatureKind>().unwrap(), FeatureKind::ProblemSolver);
        assert!("podcast".parse::<FeatureKind>().is_err());
    }

    #[test]
    fn test_temperatures_are_in_range() {
        for kind in FeatureKind::ALL {
            let t = kind.temperature();
            assert!((0.0..=1.0).contains(&t), "{kind}: {t}");
        }
        assert_eq!(FeatureKind::NewsExplainer.temperature(), 0.3);
        assert_eq!(FeatureKind::Reels.temperature(), 0.7);
    }

    #[test]
    fn test_gateway_messages_name_the_feature() {
        assert_eq!(
            FeatureKind::Reels.gateway_error_message(),
            "Failed to get a response from the AI for Reels content. Please try again."
        );
        assert!(FeatureKind::ProblemSolver.gateway_error_message().contains("Problem Solver"));
        assert!(FeatureKind::Pitch.gateway_error_message().ends_with("connection and API key."));
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&FeatureKind::GrowthDashboard).unwrap();
        assert_eq!(json, "\"growth_dashboard\"");
    }
}
