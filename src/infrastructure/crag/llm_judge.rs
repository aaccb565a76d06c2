//! LLM-backed relevance judge
//!
//! Asks the judge model a strict yes/no question about one candidate passage.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::crag::{JudgePolicy, RelevanceJudge, RelevanceVerdict};
use crate::domain::llm::{LlmProvider, LlmRequest, SafetySettings};
use crate::domain::DomainError;

const JUDGE_INSTRUCTIONS: &str = "Does the following document have exact information to answer the following query?\nPlease choose one of the two possible options: Yes, or No.\n";

/// Relevance judge that delegates to an LLM
#[derive(Debug)]
pub struct LlmRelevanceJudge {
    provider: Arc<dyn LlmProvider>,
    model: String,
    policy: JudgePolicy,
    verbose: bool,
}

impl LlmRelevanceJudge {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            policy: JudgePolicy::default(),
            verbose: false,
        }
    }

    pub fn with_policy(mut self, policy: JudgePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Log the full prompt and raw reply at info level instead of debug
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn build_prompt(query: &str, context: &str) -> String {
        format!(
            "{}\n\nQuestion: {}\n\nDocument: {}\n\nEvaluation: [Select one: Yes, No]:",
            JUDGE_INSTRUCTIONS, query, context
        )
    }
}

#[async_trait]
impl RelevanceJudge for LlmRelevanceJudge {
    async fn judge(&self, query: &str, context: &str) -> Result<RelevanceVerdict, DomainError> {
        let prompt = Self::build_prompt(query, context);

        let request = LlmRequest::builder()
            .user(prompt.clone())
            .safety(SafetySettings::block_none())
            .build();

        let response = self.provider.chat(&self.model, request).await?;
        let raw = response.content().unwrap_or_default();
        let verdict = RelevanceVerdict::from_reply(raw, self.policy);

        if self.verbose {
            info!(model = %self.model, prompt = %prompt, reply = %raw, ?verdict, "Judge exchange");
        } else {
            debug!(model = %self.model, prompt = %prompt, reply = %raw, ?verdict, "Judge exchange");
        }

        Ok(verdict)
    }

    fn judge_name(&self) -> &'static str {
        "llm"
    }
}
