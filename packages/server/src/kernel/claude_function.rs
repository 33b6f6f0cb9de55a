use anyhow::{Context, Result};
use async_trait::async_trait;
use openai_client::Message;
use serde::{Deserialize, Serialize};

use super::BaseChatAI;

/// Claude behind a cloud-function wrapper.
///
/// The wrapper answers in the OpenAI chat shape most of the time but may
/// return bare text; bare text is treated as the single message content.
pub struct ClaudeFunctionClient {
    endpoint: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct ClaudeFunctionRequest<'a> {
    messages: &'a [Message],
    model: &'a str,
    system: &'a str,
}

#[derive(Debug, Deserialize)]
struct WrappedResponse {
    choices: Vec<WrappedChoice>,
}

#[derive(Debug, Deserialize)]
struct WrappedChoice {
    message: WrappedMessage,
}

#[derive(Debug, Deserialize)]
struct WrappedMessage {
    content: String,
}

impl ClaudeFunctionClient {
    /// `base_url` is the cloud-functions host; the function path is appended.
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            endpoint: format!("{}/gcp-claudeAPI", base_url.trim_end_matches('/')),
            client,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Pull the first message out of a wrapper body, coercing non-chat bodies
/// into a single message.
pub fn coerce_wrapper_body(body: String) -> String {
    match serde_json::from_str::<WrappedResponse>(&body) {
        Ok(wrapped) => match wrapped.choices.into_iter().next() {
            Some(choice) => choice.message.content,
            None => body,
        },
        Err(_) => body,
    }
}

#[async_trait]
impl BaseChatAI for ClaudeFunctionClient {
    async fn complete(&self, model: &str, messages: Vec<Message>) -> Result<String> {
        let request = ClaudeFunctionRequest {
            messages: &messages,
            model,
            system: "",
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .context("Failed to send Claude function request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Claude function error {}: {}", status, body);
        }

        let body = response
            .text()
            .await
            .context("Failed to read Claude function response")?;

        Ok(coerce_wrapper_body(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_shaped_body_yields_first_message() {
        let body = r#"{"choices":[{"message":{"content":"1. KTVB - Boise"}}]}"#.to_string();
        assert_eq!(coerce_wrapper_body(body), "1. KTVB - Boise");
    }

    #[test]
    fn bare_text_is_coerced_into_message() {
        let body = "Here are the companies I found...".to_string();
        assert_eq!(coerce_wrapper_body(body.clone()), body);
    }

    #[test]
    fn json_without_choices_is_kept_verbatim() {
        let body = r#"{"error":"quota"}"#.to_string();
        assert_eq!(coerce_wrapper_body(body.clone()), body);
    }

    #[tokio::test]
    async fn posts_messages_with_empty_system_prompt() {
        use axum::{routing::post, Json, Router};
        use serde_json::Value;

        let router = Router::new().route(
            "/gcp-claudeAPI",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["model"], "claude-3-haiku-20240307");
                assert_eq!(body["system"], "");
                assert_eq!(body["messages"][0]["role"], "user");
                "plain text answer"
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let client = ClaudeFunctionClient::new(reqwest::Client::new(), &format!("http://{}", addr));
        let answer = client
            .complete("claude-3-haiku-20240307", vec![Message::user("enrich")])
            .await
            .unwrap();

        assert_eq!(answer, "plain text answer");
    }

    #[test]
    fn endpoint_joins_base_url() {
        let client = ClaudeFunctionClient::new(reqwest::Client::new(), "https://fn.example.net/");
        assert_eq!(client.endpoint(), "https://fn.example.net/gcp-claudeAPI");
    }
}
