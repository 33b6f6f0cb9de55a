use serde::{Deserialize, Serialize};

use super::{CompanyRecord, PlanStep, ProgressEvent};

/// Body of `/api/deepAnalysis` and `/api/plan`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub query: String,
    /// A plan fetched earlier from `/api/plan`; reused instead of re-planning
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<PlanStep>>,
}

impl AnalysisRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            steps: None,
        }
    }

    pub fn with_steps(mut self, steps: Vec<PlanStep>) -> Self {
        self.steps = Some(steps);
        self
    }
}

/// Everything one completed analysis produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResults {
    pub steps: Vec<PlanStep>,
    pub partial_results: Vec<ProgressEvent>,
    pub companies: Vec<CompanyRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeepAnalysisResponse {
    pub success: bool,
    pub progress: Vec<ProgressEvent>,
    pub results: AnalysisResults,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanResponse {
    pub success: bool,
    pub steps: Vec<PlanStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub success: bool,
    pub error: String,
    pub message: String,
    /// Orchestrator step whose failure aborted the chain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<u32>,
}
