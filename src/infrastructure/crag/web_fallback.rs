//! Web search fallback
//!
//! Compresses the query into a short search string, searches, keeps trusted
//! snippets when possible and summarizes them against the original query.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::crag::WebFallback;
use crate::domain::llm::{LlmProvider, LlmRequest, SafetySettings};
use crate::domain::search::{TrustedDomains, WebCorpus, WebSearchOutcome, WebSearchProvider};
use crate::domain::DomainError;

const COMPRESS_PROMPT: &str =
    "Summarize this query to a maximum of 4 words to perform an internet search: \nQuery: ";

/// Web fallback driven by an LLM for compression and summarization
#[derive(Debug)]
pub struct LlmWebFallback {
    llm: Arc<dyn LlmProvider>,
    model: String,
    search: Arc<dyn WebSearchProvider>,
}

impl LlmWebFallback {
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        model: impl Into<String>,
        search: Arc<dyn WebSearchProvider>,
    ) -> Self {
        Self {
            llm,
            model: model.into(),
            search,
        }
    }

    pub fn build_summary_prompt(corpus: &str, query: &str) -> String {
        format!(
            "Summarize this corpus to a maximum of 2 sentences to try to answer ONLY this query: \nCorpus: {} \nQuery: {} \nResponse: ",
            corpus, query
        )
    }

    async fn complete(&self, prompt: String) -> Result<String, DomainError> {
        let request = LlmRequest::builder()
            .user(prompt)
            .safety(SafetySettings::block_none())
            .build();

        let response = self.llm.chat(&self.model, request).await?;
        Ok(response.content().unwrap_or_default().trim().to_string())
    }

    /// Short search string for the query; the query itself when compression yields nothing
    async fn compress_query(&self, query: &str) -> Result<String, DomainError> {
        let compressed = self.complete(format!("{}{}", COMPRESS_PROMPT, query)).await?;

        if compressed.is_empty() {
            warn!("Query compression returned nothing, searching with the original query");
            Ok(query.to_string())
        } else {
            Ok(compressed)
        }
    }
}

#[async_trait]
impl WebFallback for LlmWebFallback {
    async fn fallback(
        &self,
        query: &str,
        trusted: &TrustedDomains,
    ) -> Result<WebSearchOutcome, DomainError> {
        let search_query = self.compress_query(query).await?;
        info!(search_query = %search_query, provider = self.search.provider_name(), "Searching the web");

        let hits = self.search.search(&search_query).await?;
        let corpus = WebCorpus::from_hits(&hits, trusted);

        debug!(
            hits = hits.len(),
            had_safe_results = corpus.had_safe_results,
            corpus_len = corpus.text.len(),
            "Web corpus assembled"
        );

        if !corpus.had_safe_results {
            warn!(
                trusted = ?trusted.as_slice(),
                "No results from trusted domains, using unfiltered results"
            );
        }

        if corpus.is_blank() {
            return Ok(WebSearchOutcome {
                summary: String::new(),
                had_safe_results: corpus.had_safe_results,
            });
        }

        let summary = self
            .complete(Self::build_summary_prompt(&corpus.text, query))
            .await?;

        Ok(WebSearchOutcome {
            summary,
            had_safe_results: corpus.had_safe_results,
        })
    }
}
