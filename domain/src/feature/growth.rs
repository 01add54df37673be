//! Growth Dashboard: experiments, retention levers, monetization and team ops
//! derived from the startup's current metrics.

use super::{FeatureKind, FeatureRequest, require_text};
use crate::community::{StartupMetrics, StartupProfile};
use crate::core::error::DomainError;
use crate::prompt::PromptTemplate;
use crate::response::structured::{Clarification, Discriminant, StructuredPayload};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthRequest {
    pub startup: StartupProfile,
    pub metrics: StartupMetrics,
}

impl GrowthRequest {
    pub fn new(startup: StartupProfile, metrics: StartupMetrics) -> Self {
        Self { startup, metrics }
    }

    /// Build a request from a profile that already carries its metrics.
    pub fn from_profile(startup: StartupProfile) -> Result<Self, DomainError> {
        let metrics = startup.metrics.clone().ok_or_else(|| {
            DomainError::InvalidInput(format!("startup '{}' has no metrics", startup.name))
        })?;
        Ok(Self { startup, metrics })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartPoint {
    pub name: String,
    pub value: f64,
}

/// Expected effect of a suggestion, with data for a small chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GrowthProjection {
    pub metric: String,
    pub change: String,
    pub rationale: String,
    /// "line" or "bar"
    pub chart_type: String,
    pub data: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentSample {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GrowthExperiment {
    pub title: String,
    pub hypothesis: String,
    pub expected_impact: String,
    pub execution_steps: Vec<String>,
    pub tools_needed: Vec<String>,
    pub content_sample: ContentSample,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection: Option<GrowthProjection>,
}

/// Shared shape of retention levers and monetization playbooks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GrowthPlay {
    pub title: String,
    #[serde(rename = "type")]
    pub play_type: String,
    pub description: String,
    pub implementation_idea: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection: Option<GrowthProjection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReferralCopy {
    pub headline: String,
    pub body: String,
    pub cta: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReferralStrategy {
    /// "Single-Sided", "Double-Sided" or "Creator-Based"
    pub recommended_model: String,
    pub rationale: String,
    pub campaign_flow: Vec<String>,
    pub referral_copy: ReferralCopy,
    pub suggested_tools: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Variant {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_snippet: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AbTest {
    pub title: String,
    pub location: String,
    pub hypothesis: String,
    pub variant_a: Variant,
    pub variant_b: Variant,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GrowthAlert {
    pub title: String,
    /// "High", "Medium" or "Low"
    pub severity: String,
    pub metric: String,
    pub observation: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FunnelAnalysis {
    pub weakest_stage: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamOpsTemplate {
    pub title: String,
    pub description: String,
    /// Markdown
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollaborationBooster {
    pub title: String,
    #[serde(rename = "type")]
    pub booster_type: String,
    pub description: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrainstormPrompt {
    pub title: String,
    pub audience: String,
    pub prompt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamOps {
    pub templates: Vec<TeamOpsTemplate>,
    pub collaboration_boosters: Vec<CollaborationBooster>,
    pub brainstorm_prompts: Vec<BrainstormPrompt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthDashboard {
    pub growth_experiments: Vec<GrowthExperiment>,
    #[serde(default)]
    pub retention_levers: Vec<GrowthPlay>,
    #[serde(default)]
    pub referral_strategy: ReferralStrategy,
    #[serde(default)]
    pub monetization_playbooks: Vec<GrowthPlay>,
    #[serde(default)]
    pub ab_tests: Vec<AbTest>,
    #[serde(default)]
    pub alerts: Vec<GrowthAlert>,
    #[serde(default)]
    pub funnel_analysis: FunnelAnalysis,
    #[serde(default)]
    pub team_ops: TeamOps,
}

impl GrowthDashboard {
    pub fn high_severity_alerts(&self) -> impl Iterator<Item = &GrowthAlert> {
        self.alerts
            .iter()
            .filter(|a| a.severity.eq_ignore_ascii_case("high"))
    }
}

impl StructuredPayload for GrowthDashboard {
    const NAME: &'static str = "GrowthDashboard";
    const DISCRIMINANT: Discriminant = Discriminant::Field("growthExperiments");
}

fn structure(m: &StartupMetrics, domain: &str, stage: &str) -> String {
    let daily = m.weekly_active_users as f64 / 7.0;
    format!(
        r##"{{
  "growthExperiments": [
    {{ "title": "...", "hypothesis": "...", "expectedImpact": "+X% metric", "executionSteps": ["Day 1: ...", "Day 2-3: ..."], "toolsNeeded": ["..."], "contentSample": {{ "title": "...", "body": "..." }}, "projection": {{ "metric": "DAU", "change": "+10%", "rationale": "...", "chartType": "line", "data": [{{ "name": "Day 0", "value": {d0:.1} }}, {{ "name": "Day 15", "value": {d15:.1} }}, {{ "name": "Day 30", "value": {d30:.1} }}] }} }}
  ],
  "retentionLevers": [
    {{ "title": "...", "type": "Habit Loop", "description": "...", "implementationIdea": "...", "projection": {{ "metric": "Churn", "change": "-5%", "rationale": "...", "chartType": "bar", "data": [{{ "name": "Before", "value": {churn} }}, {{ "name": "After", "value": {churn_after:.2} }}] }} }}
  ],
  "referralStrategy": {{ "recommendedModel": "Single-Sided | Double-Sided | Creator-Based", "rationale": "...", "campaignFlow": ["Step 1: ..."], "referralCopy": {{ "headline": "...", "body": "...", "cta": "..." }}, "suggestedTools": ["..."] }},
  "monetizationPlaybooks": [
    {{ "title": "...", "type": "Pricing Experiment", "description": "...", "implementationIdea": "...", "projection": {{ "metric": "Revenue", "change": "+20%", "rationale": "...", "chartType": "bar", "data": [{{ "name": "Current", "value": {revenue} }}, {{ "name": "Projected", "value": {revenue_after:.0} }}] }} }}
  ],
  "abTests": [
    {{ "title": "...", "location": "Homepage", "hypothesis": "...", "variantA": {{ "description": "..." }}, "variantB": {{ "description": "..." }} }}
  ],
  "alerts": [
    {{ "title": "High Churn Rate Alert", "severity": "High", "metric": "Churn Spike", "observation": "Your churn rate of {churn}% is higher than the industry average for a {stage} {domain} startup.", "suggestion": "..." }}
  ],
  "funnelAnalysis": {{ "weakestStage": "Activation", "suggestion": "..." }},
  "teamOps": {{
    "templates": [{{ "title": "Weekly Team Stand-up Agenda", "description": "...", "content": "# Weekly Stand-up\n..." }}],
    "collaborationBoosters": [{{ "title": "Weekly Burnout Check-in", "type": "Burnout Prevention", "description": "...", "content": "..." }}],
    "brainstormPrompts": [{{ "title": "For All Hands", "audience": "All", "prompt": "..." }}]
  }}
}}"##,
        d0 = daily,
        d15 = daily * 1.05,
        d30 = daily * 1.1,
        churn = m.churn_rate,
        churn_after = m.churn_rate * 0.95,
        revenue = m.monthly_revenue,
        revenue_after = m.monthly_revenue * 1.2,
    )
}

impl FeatureRequest for GrowthRequest {
    type Payload = GrowthDashboard;
    const KIND: FeatureKind = FeatureKind::GrowthDashboard;

    fn precheck(&self) -> Result<Option<Clarification>, DomainError> {
        require_text("startup name", &self.startup.name)?;
        Ok(None)
    }

    fn prompt(&self) -> String {
        let s = &self.startup;
        let m = &self.metrics;
        format!(
            r#"{persona} Your mission is to provide actionable, data-driven, and domain-specific growth strategies. A founder has provided the following data about their startup:

- Company Name: "{name}"
- One-Liner: "{one_liner}"
- Domain: "{domain}"
- Product Type: "{product}"
- Stage: "{stage}"
- Target Audience: "{audience}"
- Team Size: "{team}"
- Has Tech Team: {tech}
- Acquisition Channels: "{channels}"
- Key Metrics:
  - Weekly Active Users: {wau}
  - New Users per Week: {acquisition}
  - Engagement Rate: {engagement}%
  - Churn Rate: {churn}%
  - Monthly Revenue: ₹{revenue}

Generate a comprehensive growth and operations dashboard.

{contract}

Instructions:
- Generate 2-3 items for each array section.
- Keep every suggestion relevant to the domain ({domain}), product type ({product}) and stage ({stage}).
- Use the provided metrics to inform "alerts" and "funnelAnalysis".
- Every experiment, retention lever and monetization playbook MUST include a "projection" object.

{fallback}"#,
            persona = PromptTemplate::persona(
                "a world-class Growth Partner and Operations AI for startup founders",
                "specific and data-driven"
            ),
            name = s.name,
            one_liner = s.one_liner,
            domain = s.domain,
            product = s.product_type,
            stage = s.stage,
            audience = s.target_audience,
            team = s.team_members,
            tech = s.has_tech_team,
            channels = s.customer_acquisition_channels.as_deref().unwrap_or("Not specified"),
            wau = m.weekly_active_users,
            acquisition = m.user_acquisition,
            engagement = m.engagement_rate,
            churn = m.churn_rate,
            revenue = m.monthly_revenue,
            contract = PromptTemplate::json_contract(&structure(m, &s.domain, &s.stage)),
            fallback = PromptTemplate::clarification_fallback(
                "the data is too sparse to reason about",
                "Could you share how users currently find your product?"
            ),
        )
    }
}
