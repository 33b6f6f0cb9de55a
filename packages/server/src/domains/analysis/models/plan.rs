use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One step of the search strategy produced by the planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PlanStep {
    /// 1-based position in the strategy
    pub step: i64,
    pub step_title: String,
    /// Web-search queries for this step (9-12 when the step searches)
    pub queries: Vec<String>,
}

/// Ordered search strategy, produced once per request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisPlan {
    pub steps: Vec<PlanStep>,
}

impl AnalysisPlan {
    /// The degraded plan used when the planner's answer does not parse.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Total number of planned queries across all steps.
    pub fn query_count(&self) -> usize {
        self.steps.iter().map(|s| s.queries.len()).sum()
    }

    /// Parse planner output, falling back to an empty plan on any error.
    pub fn parse_lenient(raw: &str) -> (Self, Option<serde_json::Error>) {
        match serde_json::from_str(openai_client::strip_code_blocks(raw)) {
            Ok(plan) => (plan, None),
            Err(e) => (Self::empty(), Some(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_planner_output() {
        let raw = r#"{"steps":[{"step":1,"step_title":"Identify media outlets","queries":["idaho tv stations","boise radio groups"]}]}"#;
        let (plan, err) = AnalysisPlan::parse_lenient(raw);

        assert!(err.is_none());
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.steps[0].step_title, "Identify media outlets");
        assert_eq!(plan.query_count(), 2);
    }

    #[test]
    fn malformed_output_degrades_to_empty_plan() {
        let (plan, err) = AnalysisPlan::parse_lenient("Sure! Here is a plan: step 1 ...");

        assert!(err.is_some());
        assert!(plan.is_empty());
    }

    #[test]
    fn fenced_output_is_accepted() {
        let (plan, err) = AnalysisPlan::parse_lenient("```json\n{\"steps\":[]}\n```");

        assert!(err.is_none());
        assert!(plan.is_empty());
    }
}
