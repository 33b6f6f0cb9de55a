use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single piece of evidence behind a lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SourceDetail {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub date: String,
    /// Icon hint for renderers ("globe", "file", "link", ...)
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Sources {
    pub count: u32,
    pub details: Vec<SourceDetail>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Positive,
    Neutral,
    Pending,
}

/// A past CRM touchpoint. Only ever populated from fixtures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    #[serde(rename = "type")]
    pub kind: String,
    pub date: String,
    pub details: String,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Relevance {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Influence {
    #[serde(rename = "Decision Maker")]
    DecisionMaker,
    Influencer,
    Champion,
}

impl Influence {
    pub fn label(&self) -> &'static str {
        match self {
            Influence::DecisionMaker => "Decision Maker",
            Influence::Influencer => "Influencer",
            Influence::Champion => "Champion",
        }
    }
}

/// A likely buyer at a prospect. Only ever populated from fixtures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerDetail {
    pub name: String,
    pub role: String,
    pub timing: String,
    pub relevance: Relevance,
    pub title: String,
    pub responsibility: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub influence: Option<Influence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_active: Option<String>,
}

impl BuyerDetail {
    pub fn linkedin_url(&self) -> Option<String> {
        self.linkedin
            .as_ref()
            .map(|handle| format!("https://linkedin.com/in/{}", handle))
    }
}

/// A prospect company as returned by the formatting step.
///
/// `interactions` and `buyers` are not part of the schema sent to the
/// formatter; they default to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CompanyRecord {
    pub name: String,
    pub revenue: String,
    /// Percentage string, e.g. "87%"
    pub readiness: String,
    pub location: String,
    pub growth: String,
    /// Employee range, e.g. "45-50"
    pub employees: String,
    pub industry: String,
    pub logo: String,
    pub sources: Sources,
    pub reasoning: String,
    pub tags: Vec<String>,
    #[serde(default)]
    #[schemars(skip)]
    pub interactions: Vec<Interaction>,
    #[serde(default)]
    #[schemars(skip)]
    pub buyers: Vec<BuyerDetail>,
}

/// Root object the formatter is constrained to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CompanyList {
    pub companies: Vec<CompanyRecord>,
}
