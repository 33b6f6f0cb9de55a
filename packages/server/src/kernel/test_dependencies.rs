// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.
// Each mock records its calls and replays queued replies in order; a queued
// `Err` simulates an upstream failure for exactly one call.

use anyhow::Result;
use async_trait::async_trait;
use openai_client::Message;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{BaseChatAI, BaseSearchService, BaseStructuredAI, SearchHit, ServerDeps};
use crate::config::ModelConfig;

type Reply<T> = std::result::Result<T, String>;

fn replay<T>(reply: Reply<T>) -> Result<T> {
    reply.map_err(|message| anyhow::anyhow!(message))
}

// =============================================================================
// Mock Structured AI
// =============================================================================

/// Arguments captured from a structured-output call
#[derive(Debug, Clone)]
pub struct StructuredCall {
    pub model: String,
    pub schema_name: String,
    pub messages: Vec<Message>,
}

/// Replies are queued per schema name, so planner and formatter answers can
/// be scripted independently.
#[derive(Default)]
pub struct MockStructuredAI {
    replies: Mutex<HashMap<String, VecDeque<Reply<String>>>>,
    calls: Mutex<Vec<StructuredCall>>,
    latency: Option<Duration>,
}

impl MockStructuredAI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw JSON (or non-JSON) answer for `schema_name`
    pub fn with_response(self, schema_name: &str, content: impl Into<String>) -> Self {
        self.push(schema_name, Ok(content.into()));
        self
    }

    /// Queue a serialized answer for `schema_name`
    pub fn with_json_response<T: serde::Serialize>(self, schema_name: &str, data: &T) -> Self {
        let json = serde_json::to_string(data).expect("Failed to serialize mock response");
        self.with_response(schema_name, json)
    }

    /// Queue a failure for `schema_name`
    pub fn with_failure(self, schema_name: &str, message: impl Into<String>) -> Self {
        self.push(schema_name, Err(message.into()));
        self
    }

    /// Delay every reply by `latency`, keeping calls in flight
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    fn push(&self, schema_name: &str, reply: Reply<String>) {
        self.replies
            .lock()
            .unwrap()
            .entry(schema_name.to_string())
            .or_default()
            .push_back(reply);
    }

    pub fn calls(&self) -> Vec<StructuredCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls made with the given schema name
    pub fn call_count(&self, schema_name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.schema_name == schema_name)
            .count()
    }
}

#[async_trait]
impl BaseStructuredAI for MockStructuredAI {
    async fn generate_structured(
        &self,
        model: &str,
        messages: Vec<Message>,
        schema_name: &str,
        _schema: serde_json::Value,
    ) -> Result<String> {
        self.calls.lock().unwrap().push(StructuredCall {
            model: model.to_string(),
            schema_name: schema_name.to_string(),
            messages,
        });

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let reply = self
            .replies
            .lock()
            .unwrap()
            .get_mut(schema_name)
            .and_then(|queue| queue.pop_front());

        match reply {
            Some(reply) => replay(reply),
            None => anyhow::bail!("MockStructuredAI: no response queued for {}", schema_name),
        }
    }
}

// =============================================================================
// Mock Chat AI
// =============================================================================

#[derive(Default)]
pub struct MockChatAI {
    replies: Mutex<VecDeque<Reply<String>>>,
    calls: Mutex<Vec<Vec<Message>>>,
}

impl MockChatAI {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(Ok(content.into()));
        self
    }

    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(Err(message.into()));
        self
    }

    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().unwrap().clone()
    }

    /// Get the last prompt sent to the AI
    pub fn last_prompt(&self) -> Option<String> {
        self.calls
            .lock()
            .unwrap()
            .last()
            .and_then(|messages| messages.last())
            .map(|m| m.content.clone())
    }
}

#[async_trait]
impl BaseChatAI for MockChatAI {
    async fn complete(&self, _model: &str, messages: Vec<Message>) -> Result<String> {
        self.calls.lock().unwrap().push(messages);

        match self.replies.lock().unwrap().pop_front() {
            Some(reply) => replay(reply),
            None => Ok("Mock enrichment response".to_string()),
        }
    }
}

// =============================================================================
// Mock Search Service
// =============================================================================

#[derive(Default)]
pub struct MockSearchService {
    replies: Mutex<VecDeque<Reply<Vec<SearchHit>>>>,
    queries: Mutex<Vec<String>>,
}

impl MockSearchService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hits(self, hits: Vec<SearchHit>) -> Self {
        self.replies.lock().unwrap().push_back(Ok(hits));
        self
    }

    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(Err(message.into()));
        self
    }

    /// Get all queries that were searched
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseSearchService for MockSearchService {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        self.queries.lock().unwrap().push(query.to_string());

        match self.replies.lock().unwrap().pop_front() {
            Some(reply) => replay(reply),
            None => Ok(vec![]),
        }
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Mock services plus handles to inspect them after the code under test ran.
pub struct TestDependencies {
    pub structured_ai: Arc<MockStructuredAI>,
    pub chat_ai: Arc<MockChatAI>,
    pub search: Arc<MockSearchService>,
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            structured_ai: Arc::new(MockStructuredAI::new()),
            chat_ai: Arc::new(MockChatAI::new()),
            search: Arc::new(MockSearchService::new()),
        }
    }

    pub fn mock_structured_ai(mut self, ai: MockStructuredAI) -> Self {
        self.structured_ai = Arc::new(ai);
        self
    }

    pub fn mock_chat_ai(mut self, ai: MockChatAI) -> Self {
        self.chat_ai = Arc::new(ai);
        self
    }

    pub fn mock_search(mut self, search: MockSearchService) -> Self {
        self.search = Arc::new(search);
        self
    }

    /// Build ServerDeps that share these mocks
    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.structured_ai.clone(),
            self.chat_ai.clone(),
            self.search.clone(),
            ModelConfig::default(),
        )
    }

    /// Total number of outbound calls across every mock
    pub fn total_calls(&self) -> usize {
        self.structured_ai.calls().len() + self.chat_ai.calls().len() + self.search.queries().len()
    }
}
