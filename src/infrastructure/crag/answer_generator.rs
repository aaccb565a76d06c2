use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::crag::AnswerGenerator;
use crate::domain::llm::{LlmProvider, LlmRequest};
use crate::domain::DomainError;

/// Generates the final answer with a chat model, grounded in the given context
#[derive(Debug)]
pub struct LlmAnswerGenerator {
    provider: Arc<dyn LlmProvider>,
    model: String,
    max_tokens: u32,
}

impl LlmAnswerGenerator {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            provider,
            model: model.into(),
            max_tokens,
        }
    }

    pub fn build_system_prompt(context: &str) -> String {
        format!(
            "Please generate an informative and concise response to the following query.\n\
             Use the provided context information to ensure your response is accurate and relevant.\n\n\
             Context: {}",
            context
        )
    }
}

#[async_trait]
impl AnswerGenerator for LlmAnswerGenerator {
    async fn generate(&self, query: &str, context: &str) -> Result<String, DomainError> {
        let request = LlmRequest::builder()
            .system(Self::build_system_prompt(context))
            .user(query)
            .max_tokens(self.max_tokens)
            .build();

        let response = self.provider.chat(&self.model, request).await?;

        debug!(
            model = %self.model,
            finish_reason = ?response.finish_reason,
            usage = ?response.usage,
            "Answer generated"
        );

        Ok(response.content().unwrap_or_default().to_string())
    }

    fn generator_name(&self) -> &'static str {
        "llm"
    }
}
