//! Problem Solver: root cause, a staged plan and a small decision tree for a
//! founder's concrete problem.

use super::{FeatureKind, FeatureRequest, require_text};
use crate::community::User;
use crate::core::error::DomainError;
use crate::prompt::PromptTemplate;
use crate::response::structured::{Clarification, Discriminant, StructuredPayload};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemRequest {
    pub problem: String,
    pub user: User,
}

impl ProblemRequest {
    pub fn new(problem: impl Into<String>, user: User) -> Self {
        Self {
            problem: problem.into(),
            user,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RootCause {
    pub diagnosis: String,
    pub based_on: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StrategicBreakdown {
    pub this_week: Vec<String>,
    pub this_month: Vec<String>,
    #[serde(rename = "in90Days")]
    pub in_90_days: Vec<String>,
}

/// One answer to a decision node: either leads on or concludes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DecisionOption {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_node_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DecisionNode {
    pub id: String,
    pub question: String,
    pub options: Vec<DecisionOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Benchmark {
    pub metric: String,
    pub value: String,
    pub source: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SolverCaseStudy {
    pub title: String,
    pub source: String,
    pub takeaway: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemSolverResponse {
    pub root_cause: RootCause,
    #[serde(default)]
    pub strategic_breakdown: StrategicBreakdown,
    /// Nodes in order; the first one is the entry point
    #[serde(default)]
    pub decision_tree: Vec<DecisionNode>,
    #[serde(default)]
    pub benchmarks: Vec<Benchmark>,
    #[serde(default)]
    pub case_studies: Vec<SolverCaseStudy>,
}

impl ProblemSolverResponse {
    pub fn root_node(&self) -> Option<&DecisionNode> {
        self.decision_tree.first()
    }

    pub fn node(&self, id: &str) -> Option<&DecisionNode> {
        self.decision_tree.iter().find(|n| n.id == id)
    }

    /// Option targets that point at nodes not present in the tree.
    pub fn dangling_links(&self) -> Vec<&str> {
        self.decision_tree
            .iter()
            .flat_map(|n| &n.options)
            .filter_map(|o| o.next_node_id.as_deref())
            .filter(|id| self.node(id).is_none())
            .collect()
    }
}

impl StructuredPayload for ProblemSolverResponse {
    const NAME: &'static str = "ProblemSolverResponse";
    const DISCRIMINANT: Discriminant = Discriminant::Field("rootCause");
}

const STRUCTURE: &str = r#"{
  "rootCause": {
    "diagnosis": "A concise, expert diagnosis of the likely root cause, specific to the startup's domain and stage.",
    "basedOn": "Why you reached this diagnosis, referencing their context."
  },
  "strategicBreakdown": {
    "thisWeek": ["...", "..."],
    "thisMonth": ["...", "..."],
    "in90Days": ["..."]
  },
  "decisionTree": [
    { "id": "start", "question": "...", "options": [{ "text": "Yes, we do.", "nextNodeId": "node_yes" }, { "text": "No, we don't.", "nextNodeId": "node_no" }] },
    { "id": "node_yes", "question": "...", "options": [{ "text": "Option A", "answer": "..." }] },
    { "id": "node_no", "question": "...", "options": [{ "text": "Okay, I understand.", "answer": "..." }] }
  ],
  "benchmarks": [{ "metric": "e.g., LTV:CAC Ratio", "value": "e.g., 3:1 or higher", "source": "..." }],
  "caseStudies": [{ "title": "...", "source": "First Round Review", "takeaway": "...", "url": "https://..." }]
}"#;

impl FeatureRequest for ProblemRequest {
    type Payload = ProblemSolverResponse;
    const KIND: FeatureKind = FeatureKind::ProblemSolver;

    fn precheck(&self) -> Result<Option<Clarification>, DomainError> {
        if self.user.startup.is_none() {
            return Err(DomainError::MissingStartupProfile);
        }
        require_text("problem", &self.problem)?;
        Ok(None)
    }

    fn prompt(&self) -> String {
        let user = &self.user;
        let startup = user.startup.clone().unwrap_or_default();
        let metrics = startup
            .metrics
            .as_ref()
            .and_then(|m| serde_json::to_string(m).ok())
            .unwrap_or_else(|| "{}".to_string());

        format!(
            r#"{persona} Think like a partner from a top VC firm.

A founder, {founder}, has provided their startup details and a problem they are facing.
Founder & Startup Context:
- Founder Name: {founder}
- Startup Name: {name}
- One-Liner: {one_liner}
- Domain: {domain}
- Product Type: {product}
- Stage: {stage}
- Team: {team}
- Key Metrics: {metrics}

The Founder's Problem:
"{problem}"

Analyze this problem in the context of their startup and generate a comprehensive, actionable solution. Make the decision tree practical with 2-4 nodes.

{contract}

{fallback}"#,
            persona = PromptTemplate::persona(
                "\"LEAP Growth Consultant\", a 24x7 AI advisor for student startup founders",
                "experienced, sharp, and encouraging"
            ),
            founder = user.full_name,
            name = startup.name,
            one_liner = startup.one_liner,
            domain = startup.domain,
            product = startup.product_type,
            stage = startup.stage,
            team = startup.team_members,
            problem = self.problem.trim(),
            contract = PromptTemplate::json_contract(STRUCTURE),
            fallback = PromptTemplate::clarification_fallback(
                "the user's problem is too vague",
                "That's a key challenge. To help, could you tell me more about what you've tried so far to address this?"
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::community::{StartupMetrics, StartupProfile};
    use crate::response::structured::classify;
    use serde_json::json;

    fn founder(with_startup: bool) -> User {
        User {
            id: "user-1".to_string(),
            full_name: "Shreya Kolhatkar".to_string(),
            startup: with_startup.then(|| StartupProfile {
                name: "Attend.ly".to_string(),
                metrics: Some(StartupMetrics {
                    churn_rate: 8.0,
                    ..StartupMetrics::default()
                }),
                ..StartupProfile::default()
            }),
            ..User::default()
        }
    }

    #[test]
    fn test_missing_startup_is_an_error() {
        let request = ProblemRequest::new("Users churn after a week", founder(false));
        assert_eq!(request.precheck(), Err(DomainError::MissingStartupProfile));
    }

    #[test]
    fn test_prompt_includes_metrics_json() {
        let prompt = ProblemRequest::new("Users churn after a week", founder(true)).prompt();
        assert!(prompt.contains("- Startup Name: Attend.ly"));
        assert!(prompt.contains("\"churnRate\":8.0"));
        assert!(prompt.contains("\"Users churn after a week\""));
    }

    #[test]
    fn test_decision_tree_navigation() {
        let value = json!({
            "rootCause": { "diagnosis": "Weak onboarding" },
            "strategicBreakdown": { "in90Days": ["Launch referrals"] },
            "decisionTree": [
                { "id": "start", "question": "Do you onboard users?", "options": [
                    { "text": "Yes", "nextNodeId": "node_yes" },
                    { "text": "No", "nextNodeId": "node_missing" }
                ]},
                { "id": "node_yes", "question": "Is it under 3 steps?", "options": [
                    { "text": "Yes", "answer": "Measure activation" }
                ]}
            ]
        });
        let response = classify::<ProblemSolverResponse>(value).unwrap().into_success().unwrap();
        assert_eq!(response.root_node().unwrap().id, "start");
        assert_eq!(response.strategic_breakdown.in_90_days, vec!["Launch referrals"]);
        assert!(response.node("node_yes").unwrap().options[0].answer.is_some());
        assert_eq!(response.dangling_links(), vec!["node_missing"]);
    }
}
