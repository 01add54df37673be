//! Startup Compliance: India-specific registration, agreements and tax starter pack.

use super::{FeatureKind, FeatureRequest, require_text};
use crate::core::error::DomainError;
use crate::prompt::PromptTemplate;
use crate::response::structured::{Clarification, Discriminant, StructuredPayload};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceRequest {
    pub startup_name: String,
    pub num_founders: u32,
    pub business_type: String,
    /// "India" or "International"
    pub target_customers: String,
    /// "Individual", "Partnership", "Private Limited (Pvt Ltd)", "LLP" or "Not registered yet"
    pub registration_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationStep {
    pub step: u32,
    pub title: String,
    pub description: String,
    pub link: String,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationGuide {
    pub title: String,
    pub summary: String,
    pub steps: Vec<RegistrationStep>,
    pub estimated_time: String,
    pub estimated_cost: String,
}

/// A fill-in-the-blanks legal document ("[FOUNDER_1_NAME]" style placeholders).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentTemplate {
    pub title: String,
    pub description: String,
    pub template: String,
}

impl DocumentTemplate {
    /// Bracketed placeholders still present in the template, in order of appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut found = Vec::new();
        let mut rest = self.template.as_str();
        while let Some(start) = rest.find('[') {
            let Some(len) = rest[start..].find(']') else {
                break;
            };
            let inner = &rest[start + 1..start + len];
            if !inner.is_empty()
                && inner.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
                && !found.contains(&inner)
            {
                found.push(inner);
            }
            rest = &rest[start + len + 1..];
        }
        found
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaxItem {
    pub title: String,
    pub details: String,
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaxChecklist {
    pub title: String,
    pub items: Vec<TaxItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PitchSafeDeck {
    pub title: String,
    pub footer_text: String,
    pub disclaimer_text: String,
    pub sharing_tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompliancePack {
    pub registration_guide: RegistrationGuide,
    #[serde(default)]
    pub cofounder_agreement: DocumentTemplate,
    #[serde(default)]
    pub nda: DocumentTemplate,
    #[serde(default)]
    pub tax_checklist: TaxChecklist,
    #[serde(default)]
    pub pitch_safe_deck: PitchSafeDeck,
}

impl StructuredPayload for CompliancePack {
    const NAME: &'static str = "CompliancePack";
    const DISCRIMINANT: Discriminant = Discriminant::Field("registrationGuide");
}

fn structure(req: &ComplianceRequest, year: i32) -> String {
    format!(
        r#"{{
  "registrationGuide": {{
    "title": "Your Guide to Registering as a {registration}",
    "summary": "A simple summary of what this registration means for the startup.",
    "steps": [
      {{ "step": 1, "title": "Obtain Director Identification Number (DIN)", "description": "...", "link": "https://www.mca.gov.in/", "notes": "..." }}
    ],
    "estimatedTime": "e.g., 2-3 weeks",
    "estimatedCost": "e.g., ₹5,000 - ₹10,000"
  }},
  "cofounderAgreement": {{
    "title": "Basic Co-founder Agreement",
    "description": "A simple, non-binding agreement to align all founders.",
    "template": "This Co-founder Agreement is made on [DATE] between [FOUNDER_1_NAME], [FOUNDER_2_NAME]..."
  }},
  "nda": {{
    "title": "Standard Non-Disclosure Agreement (NDA)",
    "description": "A one-way NDA protecting your information.",
    "template": "This Non-Disclosure Agreement is entered into between {name} (the 'Disclosing Party') and [RECIPIENT_NAME] (the 'Receiving Party')..."
  }},
  "taxChecklist": {{
    "title": "GST & Tax Compliance Checklist",
    "items": [{{ "title": "Is GST Mandatory?", "details": "...", "link": "https://www.gst.gov.in/" }}]
  }},
  "pitchSafeDeck": {{
    "title": "Pitch-Safe Deck Tips",
    "footerText": "Confidential and Proprietary. Copyright (c) {year} {name}. All Rights Reserved.",
    "disclaimerText": "...",
    "sharingTips": ["Always share as a PDF, not an editable file."]
  }}
}}"#,
        registration = req.registration_type,
        name = req.startup_name.trim(),
    )
}

impl FeatureRequest for ComplianceRequest {
    type Payload = CompliancePack;
    const KIND: FeatureKind = FeatureKind::Compliance;

    fn precheck(&self) -> Result<Option<Clarification>, DomainError> {
        require_text("startup name", &self.startup_name)?;
        if self.num_founders == 0 {
            return Err(DomainError::InvalidInput(
                "number of founders must be at least 1".to_string(),
            ));
        }
        Ok(None)
    }

    fn prompt(&self) -> String {
        format!(
            r#"{persona} Avoid complex legal jargon.

A founder provides these details:
- Startup Name: "{name}"
- Number of Founders: {founders}
- Type of Business: "{business}"
- Target Customers: "{customers}"
- Current Registration Status: "{registration}"

Generate a comprehensive, India-specific legal and compliance starter pack.

{contract}

{fallback}"#,
            persona = PromptTemplate::persona(
                "\"Startup Compliance AI\", an expert legal assistant",
                "clear, simple, and encouraging"
            ),
            name = self.startup_name.trim(),
            founders = self.num_founders,
            business = self.business_type,
            customers = self.target_customers,
            registration = self.registration_type,
            contract = PromptTemplate::json_contract(&structure(self, Utc::now().year())),
            fallback = PromptTemplate::clarification_fallback(
                "the user's input is unclear",
                "To give you the right compliance steps, could you clarify if your product is a physical good or a digital service?"
            ),
        )
    }
}
