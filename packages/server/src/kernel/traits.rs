// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// What to prompt for and how results are combined lives in domains/analysis.
//
// Naming convention: Base* for trait names (e.g., BaseChatAI, BaseSearchService)

use anyhow::Result;
use async_trait::async_trait;
use openai_client::Message;
use serde::{Deserialize, Serialize};

// =============================================================================
// AI Traits (Infrastructure - Generic LLM capabilities)
// =============================================================================

/// An LLM that can be constrained to a JSON schema.
#[async_trait]
pub trait BaseStructuredAI: Send + Sync {
    /// Returns the raw JSON text of the answer. Parsing is left to callers
    /// because some steps degrade on malformed output and others fail.
    async fn generate_structured(
        &self,
        model: &str,
        messages: Vec<Message>,
        schema_name: &str,
        schema: serde_json::Value,
    ) -> Result<String>;
}

/// An LLM without schema enforcement.
#[async_trait]
pub trait BaseChatAI: Send + Sync {
    /// Returns the text of the first answer.
    async fn complete(&self, model: &str, messages: Vec<Message>) -> Result<String>;
}

// =============================================================================
// Search Service Trait (Infrastructure)
// =============================================================================

/// A web-search hit. Fields beyond the common ones are carried through
/// untouched so hits can be handed to an LLM verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SearchHit {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            url: Some(url.into()),
            ..Default::default()
        }
    }
}

#[async_trait]
pub trait BaseSearchService: Send + Sync {
    /// Run one web search for the raw query.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>>;
}
