//! Corrective RAG pipeline
//!
//! Answers questions from a local question/answer corpus:
//! - BM25 ranking picks the best matching passage
//! - An LLM judge decides whether that passage actually answers the query
//! - Rejected passages fall back to a web search restricted to trusted domains
//! - A generation model writes the final answer from whichever context survived

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use domain::{Corpus, CorpusSource, DomainError, Secrets};
use infrastructure::{
    crag::{CragPipeline, LlmAnswerGenerator, LlmRelevanceJudge, LlmWebFallback},
    llm::{HttpClient, LlmProviderFactory},
    search::SerperSearchProvider,
};
use tracing::{info, warn};

/// Load the corpus once at startup. An empty corpus is allowed here and
/// reported per query as `EmptyCorpus`.
pub async fn load_corpus(source: &dyn CorpusSource) -> Result<Corpus, DomainError> {
    let corpus = source.load().await?;

    if corpus.is_empty() {
        warn!(source = %source.describe(), "Corpus is empty, every query will fail at ranking");
    } else {
        info!(source = %source.describe(), documents = corpus.len(), "Corpus loaded");
    }

    Ok(corpus)
}

/// Wire the HTTP-backed judge, web fallback and generator into a pipeline
pub fn build_pipeline(
    config: &AppConfig,
    secrets: &Secrets,
    corpus: Corpus,
) -> Result<CragPipeline, DomainError> {
    let providers = &config.providers;
    let http_client = HttpClient::with_timeout(providers.request_timeout())?;

    let judge_llm = LlmProviderFactory::create(
        providers.judge_provider,
        secrets.judge_key.clone(),
        providers.judge_base_url.as_deref(),
        http_client.clone(),
    );
    let generation_llm = LlmProviderFactory::create(
        providers.generation_provider,
        secrets.generation_key.clone(),
        providers.generation_base_url.as_deref(),
        http_client.clone(),
    );

    let search = match providers.search_base_url {
        Some(ref url) => SerperSearchProvider::with_base_url(
            http_client,
            secrets.search_key.clone(),
            url.as_str(),
        ),
        None => SerperSearchProvider::new(http_client, secrets.search_key.clone()),
    };

    info!(
        judge_provider = %providers.judge_provider,
        judge_model = %providers.judge_model,
        generation_provider = %providers.generation_provider,
        generation_model = %providers.generation_model,
        "Building CRAG pipeline"
    );

    let judge = LlmRelevanceJudge::new(judge_llm.clone(), providers.judge_model.as_str())
        .with_policy(config.crag.judge_policy)
        .with_verbose(config.crag.verbose);
    let fallback = LlmWebFallback::new(judge_llm, providers.judge_model.as_str(), Arc::new(search));
    let generator = LlmAnswerGenerator::new(
        generation_llm,
        providers.generation_model.as_str(),
        config.crag.max_answer_tokens,
    );

    Ok(CragPipeline::new(
        corpus,
        Arc::new(judge),
        Arc::new(fallback),
        Arc::new(generator),
        config.crag.clone(),
    ))
}
