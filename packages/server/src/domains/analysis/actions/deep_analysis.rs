use openai_client::{strip_code_blocks, truncate_to_char_boundary, Message, StructuredOutput};
use tracing::{debug, error, info};

use super::plan::create_plan;
use crate::domains::analysis::error::{AnalysisError, AnalysisStep};
use crate::domains::analysis::models::{
    AnalysisPlan, AnalysisResults, CompanyList, ProgressEvent,
};
use crate::domains::analysis::prompts::{
    enrichment_prompt, formatting_prompt, COMPANY_SCHEMA_NAME,
};
use crate::kernel::ServerDeps;

const LOG_PREVIEW_BYTES: usize = 1000;

/// Turn one free-text query into a list of prospect companies.
///
/// Runs plan → search → enrich → format strictly in sequence. `on_progress`
/// is called once before each step. A `provided_plan` with at least one step
/// replaces the planning call.
pub async fn run_deep_analysis<F>(
    query: &str,
    provided_plan: Option<AnalysisPlan>,
    deps: &ServerDeps,
    mut on_progress: F,
) -> Result<AnalysisResults, AnalysisError>
where
    F: FnMut(ProgressEvent) + Send,
{
    if query.trim().is_empty() {
        return Err(AnalysisError::EmptyQuery);
    }

    info!(query = %query, "Starting analysis");
    let mut partial_results = Vec::new();

    // Step 1: plan
    on_progress(ProgressEvent::new(0, "Planning search strategy..."));
    let plan = match provided_plan.filter(|p| !p.is_empty()) {
        Some(plan) => {
            info!(steps = plan.len(), "Using plan supplied with the request");
            partial_results.push(ProgressEvent::new(1, "Plan created"));
            plan
        }
        None => {
            let planned = create_plan(query, deps).await?;
            let note = if planned.raw.is_empty() {
                "Plan created".to_string()
            } else {
                planned.raw
            };
            partial_results.push(ProgressEvent::new(1, note));
            planned.plan
        }
    };

    // Step 2: search. Only the raw query is searched; planned queries are advisory.
    on_progress(ProgressEvent::new(1, "Searching for companies..."));
    let hits = deps
        .search
        .search(query)
        .await
        .map_err(|e| fail(AnalysisStep::Search, e))?;

    info!(hits = hits.len(), "Search finished");
    if let Some(first) = hits.first() {
        debug!(title = ?first.title, url = ?first.url, "First search hit");
    }
    partial_results.push(ProgressEvent::new(
        1,
        format!("Found {} potential matches", hits.len()),
    ));

    // Step 3: enrich
    on_progress(ProgressEvent::new(2, "Analyzing companies..."));
    let enriched = deps
        .chat_ai
        .complete(
            &deps.models.enrichment,
            vec![Message::user(enrichment_prompt(&hits))],
        )
        .await
        .map_err(|e| fail(AnalysisStep::Enrich, e))?;

    info!(
        preview = %truncate_to_char_boundary(&enriched, LOG_PREVIEW_BYTES),
        "Enrichment response"
    );
    partial_results.push(ProgressEvent::new(2, "Enhanced company profiles"));

    // Step 4: format
    on_progress(ProgressEvent::new(3, "Preparing final results..."));
    let formatted = deps
        .structured_ai
        .generate_structured(
            &deps.models.formatter,
            vec![Message::system(formatting_prompt(&enriched))],
            COMPANY_SCHEMA_NAME,
            CompanyList::openai_schema(),
        )
        .await
        .map_err(|e| fail(AnalysisStep::Format, e))?;

    info!(length = formatted.len(), "Final response received");

    let companies = serde_json::from_str::<CompanyList>(strip_code_blocks(&formatted))
        .map_err(|source| {
            error!(
                error = %source,
                response = %truncate_to_char_boundary(&formatted, LOG_PREVIEW_BYTES),
                "Failed to parse final JSON"
            );
            AnalysisError::InvalidFinalJson { source }
        })?
        .companies;

    info!(companies = companies.len(), "Analysis complete");
    partial_results.push(ProgressEvent::new(3, "Results formatted"));

    Ok(AnalysisResults {
        steps: plan.steps,
        partial_results,
        companies,
    })
}

fn fail(step: AnalysisStep, source: anyhow::Error) -> AnalysisError {
    error!(step = step.index(), error = %format!("{:#}", source), "Analysis step failed");
    AnalysisError::step(step, source)
}
