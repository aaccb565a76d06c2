use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::http_client::HttpClientTrait;
use crate::domain::{
    DomainError, FinishReason, LlmProvider, LlmRequest, LlmResponse, Message, MessageRole, Usage,
};

const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Google Gemini (generateContent) provider
pub struct GeminiProvider<C: HttpClientTrait> {
    client: C,
    api_key: String,
    base_url: String,
}

impl<C: HttpClientTrait> std::fmt::Debug for GeminiProvider<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("client", &self.client)
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl<C: HttpClientTrait> GeminiProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_GEMINI_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            api_key: api_key.into(),
            base_url,
        }
    }

    fn generate_url(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }

    fn build_request(&self, request: &LlmRequest) -> serde_json::Value {
        let contents: Vec<GeminiContent> = request
            .messages
            .iter()
            .filter(|m| m.role != MessageRole::System)
            .map(GeminiContent::from_domain)
            .collect();

        let mut body = serde_json::json!({ "contents": contents });

        if let Some(system) = request.system_text() {
            body["systemInstruction"] = serde_json::json!({ "parts": [{ "text": system }] });
        }

        if let Some(ref safety) = request.safety {
            body["safetySettings"] = serde_json::json!(safety);
        }

        let mut generation_config = serde_json::Map::new();
        if let Some(max_tokens) = request.max_tokens {
            generation_config.insert("maxOutputTokens".into(), serde_json::json!(max_tokens));
        }
        if !generation_config.is_empty() {
            body["generationConfig"] = serde_json::Value::Object(generation_config);
        }

        body
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("x-goog-api-key", self.api_key.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn parse_response(
        &self,
        model: &str,
        json: serde_json::Value,
    ) -> Result<LlmResponse, DomainError> {
        let response: GeminiResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("gemini", format!("Failed to parse response: {}", e))
        })?;

        // A blocked prompt comes back with no candidates; that is an empty reply, not a failure
        let candidate = response.candidates.into_iter().next();

        let text = candidate
            .as_ref()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let id = response.response_id.unwrap_or_default();
        let model = response.model_version.unwrap_or_else(|| model.to_string());
        let mut llm_response = LlmResponse::new(id, model, Message::assistant(text));

        if let Some(reason) = candidate.and_then(|c| c.finish_reason) {
            llm_response = llm_response.with_finish_reason(parse_finish_reason(&reason));
        }

        if let Some(usage) = response.usage_metadata {
            llm_response = llm_response.with_usage(Usage::new(
                usage.prompt_token_count,
                usage.candidates_token_count,
            ));
        }

        Ok(llm_response)
    }
}

#[async_trait]
impl<C: HttpClientTrait> LlmProvider for GeminiProvider<C> {
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError> {
        let url = self.generate_url(model);
        let body = self.build_request(&request);
        let response = self
            .client
            .post_json(&url, self.headers(), &body)
            .await
            .map_err(|e| DomainError::provider("gemini", e.to_string()))?;

        self.parse_response(model, response)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}

fn parse_finish_reason(reason: &str) -> FinishReason {
    match reason {
        "STOP" => FinishReason::Stop,
        "MAX_TOKENS" => FinishReason::Length,
        "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" => {
            FinishReason::ContentFilter
        }
        _ => FinishReason::Error,
    }
}

// Gemini API types

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: &'static str,
    parts: Vec<GeminiPartOut>,
}

#[derive(Debug, Serialize)]
struct GeminiPartOut {
    text: String,
}

impl GeminiContent {
    fn from_domain(message: &Message) -> Self {
        let role = match message.role {
            MessageRole::Assistant => "model",
            _ => "user",
        };

        Self {
            role,
            parts: vec![GeminiPartOut {
                text: message.content_text().to_string(),
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<GeminiUsage>,
    model_version: Option<String>,
    response_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiPartIn>,
}

#[derive(Debug, Deserialize)]
struct GeminiPartIn {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SafetySettings;
    use crate::infrastructure::llm::http_client::mock::MockHttpClient;

    const TEST_URL: &str =
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

    fn reply(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "promptTokenCount": 42, "candidatesTokenCount": 1 },
            "modelVersion": "gemini-2.0-flash",
            "responseId": "resp-1"
        })
    }

    #[tokio::test]
    async fn test_gemini_chat() {
        let client = MockHttpClient::new().with_response(TEST_URL, reply("Yes"));
        let provider = GeminiProvider::new(client, "gm-key");

        let request = LlmRequest::builder().user("Is this relevant?").build();
        let response = provider.chat("gemini-2.0-flash", request).await.unwrap();

        assert_eq!(response.content(), Some("Yes"));
        assert_eq!(response.id, "resp-1");
        assert_eq!(response.finish_reason, Some(FinishReason::Stop));
        assert_eq!(response.usage.unwrap().total_tokens, 43);
    }

    #[tokio::test]
    async fn test_gemini_request_body() {
        let client = MockHttpClient::new().with_response(TEST_URL, reply("ok"));
        let provider = GeminiProvider::new(client, "gm-key");

        let request = LlmRequest::builder()
            .system("Answer briefly")
            .user("prompt text")
            .max_tokens(50)
            .safety(SafetySettings::block_none())
            .build();
        provider.chat("gemini-2.0-flash", request).await.unwrap();

        let sent = provider.client.last_request().unwrap();
        assert_eq!(sent.header("x-goog-api-key"), Some("gm-key"));
        assert_eq!(sent.body["contents"].as_array().unwrap().len(), 1);
        assert_eq!(sent.body["contents"][0]["role"], "user");
        assert_eq!(sent.body["contents"][0]["parts"][0]["text"], "prompt text");
        assert_eq!(
            sent.body["systemInstruction"]["parts"][0]["text"],
            "Answer briefly"
        );
        assert_eq!(sent.body["generationConfig"]["maxOutputTokens"], 50);

        let safety = sent.body["safetySettings"].as_array().unwrap();
        assert_eq!(safety.len(), 4);
        assert!(safety.iter().all(|s| s["threshold"] == "BLOCK_NONE"));
    }

    #[tokio::test]
    async fn test_gemini_without_optional_fields() {
        let client = MockHttpClient::new().with_response(TEST_URL, reply("ok"));
        let provider = GeminiProvider::new(client, "gm-key");

        provider
            .chat("gemini-2.0-flash", LlmRequest::builder().user("hi").build())
            .await
            .unwrap();

        let sent = provider.client.last_request().unwrap();
        assert!(sent.body.get("systemInstruction").is_none());
        assert!(sent.body.get("safetySettings").is_none());
        assert!(sent.body.get("generationConfig").is_none());
    }

    #[tokio::test]
    async fn test_gemini_blocked_prompt_is_empty_reply() {
        let client = MockHttpClient::new().with_response(
            TEST_URL,
            serde_json::json!({ "promptFeedback": { "blockReason": "SAFETY" } }),
        );
        let provider = GeminiProvider::new(client, "gm-key");

        let response = provider
            .chat("gemini-2.0-flash", LlmRequest::builder().user("hi").build())
            .await
            .unwrap();

        assert_eq!(response.content(), None);
        assert_eq!(response.model, "gemini-2.0-flash");
    }

    #[tokio::test]
    async fn test_gemini_transport_error() {
        let client = MockHttpClient::new().with_error(TEST_URL, "HTTP 429: quota");
        let provider = GeminiProvider::new(client, "gm-key");

        let result = provider
            .chat("gemini-2.0-flash", LlmRequest::builder().user("hi").build())
            .await;

        assert!(matches!(result, Err(DomainError::Provider { ref provider, .. }) if provider == "gemini"));
    }

    #[test]
    fn test_parse_finish_reason() {
        assert_eq!(parse_finish_reason("MAX_TOKENS"), FinishReason::Length);
        assert_eq!(parse_finish_reason("SAFETY"), FinishReason::ContentFilter);
        assert_eq!(parse_finish_reason("OTHER"), FinishReason::Error);
    }
}
