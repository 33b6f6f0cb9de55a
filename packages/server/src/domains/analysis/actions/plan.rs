use openai_client::{Message, StructuredOutput};
use tracing::{info, warn};

use crate::domains::analysis::error::{AnalysisError, AnalysisStep};
use crate::domains::analysis::models::AnalysisPlan;
use crate::domains::analysis::prompts::{planning_prompt, PLAN_SCHEMA_NAME};
use crate::kernel::ServerDeps;

/// A plan together with the planner's raw answer.
#[derive(Debug, Clone)]
pub struct PlannedAnalysis {
    pub plan: AnalysisPlan,
    pub raw: String,
}

/// Ask the planner for a search strategy.
///
/// A planner that cannot be reached fails the request; an answer that does
/// not parse degrades to an empty plan.
pub async fn create_plan(query: &str, deps: &ServerDeps) -> Result<PlannedAnalysis, AnalysisError> {
    if query.trim().is_empty() {
        return Err(AnalysisError::EmptyQuery);
    }

    info!(model = %deps.models.planner, "Planning search strategy");

    let raw = deps
        .structured_ai
        .generate_structured(
            &deps.models.planner,
            vec![Message::user(planning_prompt(query))],
            PLAN_SCHEMA_NAME,
            AnalysisPlan::openai_schema(),
        )
        .await
        .map_err(|e| AnalysisError::step(AnalysisStep::Plan, e))?;

    let (plan, parse_error) = AnalysisPlan::parse_lenient(&raw);
    if let Some(e) = parse_error {
        warn!(error = %e, "Planner response was not valid JSON, continuing with an empty plan");
    }

    info!(
        steps = plan.len(),
        queries = plan.query_count(),
        "Steps planned"
    );

    Ok(PlannedAnalysis { plan, raw })
}
