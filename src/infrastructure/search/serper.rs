use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::domain::{DomainError, SearchHit, WebSearchProvider};
use crate::infrastructure::llm::HttpClientTrait;

const DEFAULT_SERPER_BASE_URL: &str = "https://google.serper.dev";

/// Serper.dev Google search provider
pub struct SerperSearchProvider<C: HttpClientTrait> {
    client: C,
    api_key: String,
    base_url: String,
}

impl<C: HttpClientTrait> std::fmt::Debug for SerperSearchProvider<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerperSearchProvider")
            .field("client", &self.client)
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl<C: HttpClientTrait> SerperSearchProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_SERPER_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("X-API-KEY", self.api_key.as_str()),
            ("Content-Type", "application/json"),
        ]
    }
}

#[async_trait]
impl<C: HttpClientTrait> WebSearchProvider for SerperSearchProvider<C> {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, DomainError> {
        let body = serde_json::json!({ "q": query });

        let json = self
            .client
            .post_json(&self.search_url(), self.headers(), &body)
            .await
            .map_err(|e| DomainError::search_unavailable(format!("serper: {}", e)))?;

        let response: SerperResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::search_unavailable(format!("serper: failed to parse response: {}", e))
        })?;

        let hits: Vec<SearchHit> = response
            .organic
            .into_iter()
            .filter_map(|result| {
                let snippet = result.snippet?;
                Some(SearchHit::new(snippet, result.link.unwrap_or_default()))
            })
            .collect();

        debug!(query = %query, hits = hits.len(), "Serper search completed");

        Ok(hits)
    }

    fn provider_name(&self) -> &'static str {
        "serper"
    }
}

#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SerperOrganic>,
}

#[derive(Debug, Deserialize)]
struct SerperOrganic {
    snippet: Option<String>,
    link: Option<String>,
}
