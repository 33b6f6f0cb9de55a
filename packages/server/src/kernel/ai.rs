// AI implementation using OpenAI
//
// This is the infrastructure implementation of BaseStructuredAI.
// Business logic (what to prompt for) lives in domain layers.

use anyhow::{Context, Result};
use async_trait::async_trait;
use openai_client::{Message, OpenAIClient};

use super::BaseStructuredAI;

#[async_trait]
impl BaseStructuredAI for OpenAIClient {
    async fn generate_structured(
        &self,
        model: &str,
        messages: Vec<Message>,
        schema_name: &str,
        schema: serde_json::Value,
    ) -> Result<String> {
        self.structured_output(model, messages, schema_name, schema)
            .await
            .with_context(|| format!("OpenAI structured output failed (model {})", model))
    }
}
