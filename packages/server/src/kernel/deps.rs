//! Server dependencies for the analysis pipeline (using traits for testability)
//!
//! This module provides the central dependency container used by domain actions.
//! All external services use trait abstractions to enable testing.

use anyhow::{Context, Result};
use openai_client::OpenAIClient;
use std::sync::Arc;

use crate::config::{Config, ModelConfig};
use crate::kernel::{
    BaseChatAI, BaseSearchService, BaseStructuredAI, ClaudeFunctionClient, YouSearchClient,
};

/// Server dependencies accessible to actions (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    /// Schema-enforcing LLM (planning and final formatting)
    pub structured_ai: Arc<dyn BaseStructuredAI>,
    /// Free-text LLM (enrichment)
    pub chat_ai: Arc<dyn BaseChatAI>,
    pub search: Arc<dyn BaseSearchService>,
    pub models: ModelConfig,
}

impl ServerDeps {
    pub fn new(
        structured_ai: Arc<dyn BaseStructuredAI>,
        chat_ai: Arc<dyn BaseChatAI>,
        search: Arc<dyn BaseSearchService>,
        models: ModelConfig,
    ) -> Self {
        Self {
            structured_ai,
            chat_ai,
            search,
            models,
        }
    }

    /// Wire the production services described by `config`.
    ///
    /// One `reqwest::Client` (with the configured timeout) is shared by every
    /// outbound service.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .context("Failed to create HTTP client")?;

        let openai = OpenAIClient::with_http_client(http.clone(), config.openai_api_key.clone())
            .with_base_url(config.openai_base_url.clone());

        Ok(Self::new(
            Arc::new(openai),
            Arc::new(ClaudeFunctionClient::new(
                http.clone(),
                &config.cloud_functions_url,
            )),
            Arc::new(YouSearchClient::new(http, &config.cloud_functions_url)),
            config.models.clone(),
        ))
    }
}
