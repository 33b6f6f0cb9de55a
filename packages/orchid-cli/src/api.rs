//! HTTP client for the Orchid API.

use orchid_core::domains::analysis::models::{
    AnalysisRequest, DeepAnalysisResponse, ErrorResponse, PlanResponse, PlanStep,
};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::retry::{with_retry, RetryPolicy};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3699";

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server could not be reached or the connection dropped
    #[error("Could not reach the Orchid server: {0}")]
    Network(#[source] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("{message}")]
    Status {
        status: u16,
        message: String,
        step: Option<u32>,
    },

    /// A 2xx response whose body was not the expected envelope
    #[error("Unexpected response from the Orchid server: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    /// Client errors (4xx) will fail the same way again; everything else may not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network(_) => true,
            ApiError::Status { status, .. } => *status >= 500,
            ApiError::Decode(_) => false,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Thin wrapper over the three Orchid endpoints.
#[derive(Clone)]
pub struct OrchidApi {
    client: Client,
    base_url: String,
}

impl OrchidApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /health`; true when the server answers "OK".
    pub async fn health(&self) -> Result<bool, ApiError> {
        let response = self
            .client
            .get(self.url("/health"))
            .send()
            .await
            .map_err(ApiError::Network)?;

        if !response.status().is_success() {
            return Ok(false);
        }
        let body = response.text().await.map_err(ApiError::Decode)?;
        Ok(body.trim() == "OK")
    }

    /// `POST /api/plan`
    pub async fn plan(&self, query: &str) -> Result<Vec<PlanStep>, ApiError> {
        let response: PlanResponse = self
            .post("/api/plan", &AnalysisRequest::new(query))
            .await?;
        Ok(response.steps)
    }

    /// `POST /api/deepAnalysis`, one attempt.
    pub async fn deep_analysis(
        &self,
        request: &AnalysisRequest,
    ) -> Result<DeepAnalysisResponse, ApiError> {
        self.post("/api/deepAnalysis", request).await
    }

    /// `POST /api/deepAnalysis`, retried according to `policy`.
    pub async fn deep_analysis_with_retry(
        &self,
        request: &AnalysisRequest,
        policy: &RetryPolicy,
    ) -> Result<DeepAnalysisResponse, ApiError> {
        with_retry(policy, move || self.deep_analysis(request)).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        request: &AnalysisRequest,
    ) -> Result<T, ApiError> {
        debug!(path, query = %request.query, "Sending request");

        let response = self
            .client
            .post(self.url(path))
            .json(request)
            .send()
            .await
            .map_err(ApiError::Network)?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        response.json().await.map_err(ApiError::Decode)
    }
}

/// Prefer the server's `message`; fall back to the raw body.
async fn status_error(response: Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(err) => ApiError::Status {
            status: status.as_u16(),
            message: err.message,
            step: err.step,
        },
        Err(_) => ApiError::Status {
            status: status.as_u16(),
            message: fallback_message(status, &body),
            step: None,
        },
    }
}

fn fallback_message(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        format!("HTTP error! status: {}", status.as_u16())
    } else {
        format!("HTTP error! status: {} - {}", status.as_u16(), body)
    }
}
