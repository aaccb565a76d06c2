use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::http_client::HttpClient;
use super::{GeminiProvider, OpenAiProvider};
use crate::domain::LlmProvider;

/// Which API a model role talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmProviderKind {
    #[serde(rename = "openai")]
    OpenAi,
    Gemini,
}

impl std::fmt::Display for LlmProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProviderKind::OpenAi => write!(f, "openai"),
            LlmProviderKind::Gemini => write!(f, "gemini"),
        }
    }
}

/// Factory for creating LLM providers
#[derive(Debug)]
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    /// Create a provider of the given kind. `base_url` overrides the public endpoint.
    pub fn create(
        kind: LlmProviderKind,
        api_key: impl Into<String>,
        base_url: Option<&str>,
        http_client: HttpClient,
    ) -> Arc<dyn LlmProvider> {
        match (kind, base_url) {
            (LlmProviderKind::OpenAi, Some(url)) => {
                Arc::new(OpenAiProvider::with_base_url(http_client, api_key, url))
            }
            (LlmProviderKind::OpenAi, None) => Arc::new(OpenAiProvider::new(http_client, api_key)),
            (LlmProviderKind::Gemini, Some(url)) => {
                Arc::new(GeminiProvider::with_base_url(http_client, api_key, url))
            }
            (LlmProviderKind::Gemini, None) => Arc::new(GeminiProvider::new(http_client, api_key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_by_kind() {
        let judge = LlmProviderFactory::create(
            LlmProviderKind::Gemini,
            "gm",
            Some("http://localhost:9000"),
            HttpClient::new(),
        );
        let generator =
            LlmProviderFactory::create(LlmProviderKind::OpenAi, "sk", None, HttpClient::new());

        assert_eq!(judge.provider_name(), "gemini");
        assert_eq!(generator.provider_name(), "openai");
    }

    #[test]
    fn test_kind_deserialization() {
        let kind: LlmProviderKind = serde_json::from_str("\"openai\"").unwrap();
        assert_eq!(kind, LlmProviderKind::OpenAi);
        assert_eq!(LlmProviderKind::Gemini.to_string(), "gemini");
    }
}
