//! Analysis endpoints.
//!
//! POST /api/plan          -> planning phase only
//! POST /api/deepAnalysis  -> full plan/search/enrich/format chain
//!
//! Progress is collected in memory for the lifetime of the request and
//! returned with the envelope rather than streamed.

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::domains::analysis::models::{
    AnalysisPlan, AnalysisRequest, DeepAnalysisResponse, ErrorResponse, PlanResponse,
};
use crate::domains::analysis::{create_plan, run_deep_analysis, AnalysisError};
use crate::server::app::AxumAppState;

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        if self.is_validation() {
            let body = ErrorResponse {
                success: false,
                error: "Invalid query".to_string(),
                message: self.to_string(),
                step: None,
            };
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }

        let body = ErrorResponse {
            success: false,
            error: "Analysis failed".to_string(),
            message: self.to_string(),
            step: self.failed_step(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

fn new_request_id() -> String {
    Uuid::new_v4().simple().to_string()[..7].to_string()
}

pub async fn deep_analysis_handler(
    Extension(state): Extension<AxumAppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<DeepAnalysisResponse>, AnalysisError> {
    let request_id = new_request_id();
    let span = info_span!("deep_analysis", request_id = %request_id);

    async move {
        info!(query = %request.query, "New request received");

        if request.query.trim().is_empty() {
            warn!("Empty query received");
            return Err(AnalysisError::EmptyQuery);
        }

        let provided_plan = request.steps.map(|steps| AnalysisPlan { steps });
        let mut progress = Vec::new();

        let results = run_deep_analysis(&request.query, provided_plan, &state.deps, |event| {
            info!(step = event.step, info = %event.info, "Progress");
            progress.push(event);
        })
        .await
        .map_err(|e| {
            error!(error = %e, step = ?e.failed_step(), "Analysis failed");
            e
        })?;

        info!(companies = results.companies.len(), "Analysis completed successfully");

        Ok(Json(DeepAnalysisResponse {
            success: true,
            progress,
            results,
        }))
    }
    .instrument(span)
    .await
}

pub async fn plan_handler(
    Extension(state): Extension<AxumAppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<PlanResponse>, AnalysisError> {
    let request_id = new_request_id();
    let span = info_span!("plan", request_id = %request_id);

    async move {
        info!(query = %request.query, "Plan requested");

        let planned = create_plan(&request.query, &state.deps).await.map_err(|e| {
            if !e.is_validation() {
                error!(error = %e, "Planning failed");
            }
            e
        })?;

        Ok(Json(PlanResponse {
            success: true,
            steps: planned.plan.steps,
        }))
    }
    .instrument(span)
    .await
}
