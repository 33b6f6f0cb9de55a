use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{BaseSearchService, SearchHit};

/// You.com web search, reached through a cloud-function proxy that holds
/// the API key.
pub struct YouSearchClient {
    endpoint: String,
    client: reqwest::Client,
}

/// Cloud function request
#[derive(Debug, Serialize)]
struct YouSearchRequest<'a> {
    prompt: &'a str,
}

/// Cloud function response
#[derive(Debug, Deserialize)]
struct YouSearchResponse {
    #[serde(default)]
    hits: Option<Vec<SearchHit>>,
}

impl YouSearchClient {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            endpoint: format!("{}/youAPIFunction", base_url.trim_end_matches('/')),
            client,
        }
    }
}

#[async_trait]
impl BaseSearchService for YouSearchClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&YouSearchRequest { prompt: query })
            .send()
            .await
            .context("Failed to send You.com search request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("You.com search error {}: {}", status, body);
        }

        let search_response: YouSearchResponse = response
            .json()
            .await
            .context("Failed to parse You.com search response")?;

        Ok(search_response.hits.unwrap_or_default())
    }
}
