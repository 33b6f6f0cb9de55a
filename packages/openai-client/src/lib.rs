//! Minimal OpenAI chat-completions client
//!
//! A small client for the OpenAI API with no domain-specific logic.
//! Supports plain chat completions and schema-constrained (structured) output.
//!
//! # Example
//!
//! ```rust,ignore
//! use openai_client::{OpenAIClient, ChatRequest, Message};
//!
//! let client = OpenAIClient::from_env()?;
//!
//! let response = client
//!     .chat_completion(ChatRequest::new("gpt-4o-mini").message(Message::user("Hello!")))
//!     .await?;
//! ```
//!
//! # Type-Safe Structured Output
//!
//! ```rust,ignore
//! #[derive(Deserialize, JsonSchema)]
//! struct Plan {
//!     steps: Vec<String>,
//! }
//!
//! let plan: Plan = client
//!     .extract::<Plan>("gpt-4o-mini", vec![Message::user(prompt)])
//!     .await?;
//! ```

pub mod error;
pub mod schema;
pub mod types;

pub use error::{OpenAIError, Result};
pub use schema::StructuredOutput;
pub use types::*;

use reqwest::Client;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI API client.
#[derive(Clone)]
pub struct OpenAIClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAIClient {
    /// Create a new OpenAI client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_http_client(Client::new(), api_key)
    }

    /// Create a client that reuses an existing `reqwest::Client`.
    pub fn with_http_client(http_client: Client, api_key: impl Into<String>) -> Self {
        Self {
            http_client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create from environment variable `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| OpenAIError::Config("OPENAI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (proxies, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Chat completion.
    ///
    /// Returns the content of the first choice. Works for both free-text
    /// requests and requests carrying a `json_schema` response format.
    pub async fn chat_completion(&self, request: ChatRequest) -> Result<ChatResponse> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, model = %request.model, "OpenAI request failed");
                OpenAIError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %body, "OpenAI API error");
            return Err(OpenAIError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let raw: types::ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| OpenAIError::Parse(e.to_string()))?;

        let message = raw
            .choices
            .into_iter()
            .next()
            .map(|c| c.message)
            .ok_or(OpenAIError::EmptyResponse)?;

        let content = match (message.content, message.refusal) {
            (Some(content), _) => content,
            (None, Some(refusal)) => {
                return Err(OpenAIError::Api {
                    status: status.as_u16(),
                    body: format!("model refused: {}", refusal),
                })
            }
            (None, None) => return Err(OpenAIError::EmptyResponse),
        };

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            content_len = content.len(),
            "OpenAI chat completion"
        );

        Ok(ChatResponse { content })
    }

    /// Structured output with an explicit JSON schema.
    ///
    /// Returns the raw JSON text; callers decide how to treat parse failures.
    pub async fn structured_output(
        &self,
        model: &str,
        messages: Vec<Message>,
        schema_name: &str,
        schema: serde_json::Value,
    ) -> Result<String> {
        let request = ChatRequest::new(model)
            .messages(messages)
            .json_schema(schema_name, schema);

        self.chat_completion(request).await.map(|r| r.content)
    }

    /// Type-safe structured output extraction.
    ///
    /// Generates the schema from `T`, sends it, and deserializes the answer.
    pub async fn extract<T: StructuredOutput>(
        &self,
        model: &str,
        messages: Vec<Message>,
    ) -> Result<T> {
        let schema = T::openai_schema();
        let name = T::type_name();

        let json_str = self.structured_output(model, messages, &name, schema).await?;

        serde_json::from_str(strip_code_blocks(&json_str))
            .map_err(|e| OpenAIError::Parse(format!("Failed to deserialize {}: {}", name, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::post, Json, Router};
    use serde_json::{json, Value};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_client_builder() {
        let client = OpenAIClient::new("sk-test").with_base_url("https://custom.api.com/");

        assert_eq!(client.api_key, "sk-test");
        assert_eq!(client.base_url(), "https://custom.api.com");
    }

    #[tokio::test]
    async fn test_chat_completion_returns_first_choice() {
        let router = Router::new().route(
            "/chat/completions",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["response_format"]["type"], "json_schema");
                Json(json!({
                    "choices": [{ "message": { "content": "{\"steps\":[]}" } }]
                }))
            }),
        );
        let base = serve(router).await;
        let client = OpenAIClient::new("sk-test").with_base_url(base);

        let content = client
            .structured_output(
                "gpt-4o-mini",
                vec![Message::user("plan")],
                "plan",
                json!({"type": "object"}),
            )
            .await
            .unwrap();

        assert_eq!(content, "{\"steps\":[]}");
    }

    #[tokio::test]
    async fn test_non_success_status_is_api_error() {
        let router = Router::new().route(
            "/chat/completions",
            post(|| async { (axum::http::StatusCode::TOO_MANY_REQUESTS, "slow down") }),
        );
        let base = serve(router).await;
        let client = OpenAIClient::new("sk-test").with_base_url(base);

        let err = client
            .chat_completion(ChatRequest::new("gpt-4o").message(Message::user("hi")))
            .await
            .unwrap_err();

        match err {
            OpenAIError::Api { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "slow down");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let client = OpenAIClient::new("sk-test").with_base_url("http://127.0.0.1:1");

        let err = client
            .chat_completion(ChatRequest::new("gpt-4o").message(Message::user("hi")))
            .await
            .unwrap_err();

        assert!(err.is_network());
    }
}
