//! Fundraising Co-pilot: readiness score, deck diagnostics, investor targeting
//! and outreach for Series A and later.

use super::pitch::PitchDeckSlide;
use super::{FeatureKind, FeatureRequest, require_text};
use crate::core::error::DomainError;
use crate::prompt::PromptTemplate;
use crate::response::structured::{Clarification, Discriminant, StructuredPayload};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundraisingRequest {
    pub pitch_deck_outline: String,
    pub stage: String,
    pub sector: String,
    #[serde(rename = "mrr_arr")]
    pub mrr_arr: f64,
    #[serde(rename = "dau_mau")]
    pub dau_mau: f64,
    pub cac: f64,
    pub ltv: f64,
    /// Percentage
    pub retention: f64,
    /// Month-over-month percentage
    #[serde(rename = "growth_mom")]
    pub growth_mom: f64,
    pub traction_summary: String,
}

impl FundraisingRequest {
    /// LTV:CAC, or `None` when CAC is not positive.
    pub fn ltv_to_cac(&self) -> Option<f64> {
        (self.cac > 0.0).then(|| self.ltv / self.cac)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Readiness {
    /// 0-100
    pub score: f64,
    pub guidance: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeckDiagnostic {
    pub slide: String,
    /// 0-10
    pub score: f64,
    pub feedback: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvestorPersona {
    #[serde(rename = "type")]
    pub persona_type: String,
    pub description: String,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutreachTemplate {
    #[serde(rename = "type")]
    pub template_type: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FundingSource {
    pub name: String,
    pub description: String,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FundraisingFunnel {
    pub outreach: u32,
    pub intro: u32,
    pub call: u32,
    pub term_sheet: u32,
}

impl FundraisingFunnel {
    /// Share of outreach that ends in a term sheet, as a percentage.
    pub fn conversion_rate(&self) -> f64 {
        if self.outreach == 0 {
            0.0
        } else {
            f64::from(self.term_sheet) / f64::from(self.outreach) * 100.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundraisingPlan {
    pub readiness: Readiness,
    #[serde(default)]
    pub deck_diagnostics: Vec<DeckDiagnostic>,
    #[serde(default)]
    pub enhanced_deck: Vec<PitchDeckSlide>,
    #[serde(default)]
    pub investor_personas: Vec<InvestorPersona>,
    #[serde(default)]
    pub outreach_templates: Vec<OutreachTemplate>,
    #[serde(default)]
    pub funding_sources: Vec<FundingSource>,
    #[serde(default)]
    pub fundraising_funnel: FundraisingFunnel,
}

impl StructuredPayload for FundraisingPlan {
    const NAME: &'static str = "FundraisingPlan";
    const DISCRIMINANT: Discriminant = Discriminant::Field("readiness");
}

fn structure(req: &FundraisingRequest) -> String {
    let ratio = req
        .ltv_to_cac()
        .map(|r| format!("{r:.1}"))
        .unwrap_or_else(|| "n/a".to_string());
    format!(
        r#"{{
  "readiness": {{ "score": 82, "guidance": "..." }},
  "deckDiagnostics": [
    {{ "slide": "Problem", "score": 9, "feedback": "..." }},
    {{ "slide": "Go-to-Market", "score": 5, "feedback": "..." }}
  ],
  "enhancedDeck": [
    {{ "title": "1. The Vision", "content": ["..."] }},
    {{ "title": "6. Traction", "content": ["MRR/ARR Growth: {mrr}", "DAU/MAU Engagement: {dau}"] }},
    {{ "title": "7. Business Model", "content": ["LTV:CAC ratio: {ratio}"] }}
  ],
  "investorPersonas": [
    {{ "type": "Sector-focused VC", "description": "VCs in India with a strong portfolio in {sector}.", "examples": ["..."] }}
  ],
  "outreachTemplates": [
    {{ "type": "Cold Email", "subject": "Intro: [Your Startup Name] - Scaling {sector} in India", "body": "Hi [Investor Name], ... {growth}% MoM growth ..." }}
  ],
  "fundingSources": [
    {{ "name": "Venture Debt Funds", "description": "...", "examples": ["..."] }}
  ],
  "fundraisingFunnel": {{ "outreach": 150, "intro": 50, "call": 20, "termSheet": 3 }}
}}"#,
        mrr = req.mrr_arr,
        dau = req.dau_mau,
        sector = req.sector,
        growth = req.growth_mom,
    )
}

impl FeatureRequest for FundraisingRequest {
    type Payload = FundraisingPlan;
    const KIND: FeatureKind = FeatureKind::Fundraising;

    fn precheck(&self) -> Result<Option<Clarification>, DomainError> {
        require_text("sector", &self.sector)?;
        Ok(None)
    }

    fn prompt(&self) -> String {
        format!(
            r#"{persona} You are simulating a top-tier VC partner from a firm like Sequoia or Accel. Your audience is startup founders in India seeking Series A or later funding.

A founder provides the following data:
- Pitch Deck Outline: "{outline}"
- Startup Stage: "{stage}"
- Sector: "{sector}"
- Key Metrics:
  - MRR/ARR: {mrr}
  - DAU/MAU: {dau}
  - CAC: {cac}
  - LTV: {ltv}
  - Retention %: {retention}
  - Growth % (MoM): {growth}
- Traction Summary: "{traction}"

Generate a comprehensive fundraising assistance package. Diagnose every slide of the outline and rewrite the deck as an enhanced eleven-slide Series A deck.

{contract}

{fallback}"#,
            persona = PromptTemplate::persona(
                "an AI Fundraising Co-pilot",
                "sharp, investor-grade, and actionable"
            ),
            outline = self.pitch_deck_outline.trim(),
            stage = self.stage,
            sector = self.sector,
            mrr = self.mrr_arr,
            dau = self.dau_mau,
            cac = self.cac,
            ltv = self.ltv,
            retention = self.retention,
            growth = self.growth_mom,
            traction = self.traction_summary.trim(),
            contract = PromptTemplate::json_contract(&structure(self)),
            fallback = PromptTemplate::clarification_fallback(
                "the deck outline and metrics are too thin to assess",
                "Could you share the slide titles of your current deck?"
            ),
        )
    }
}
