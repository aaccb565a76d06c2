//! CRAG pipeline implementation
//!
//! Runs one query through rank, judge, optional web fallback and generation.

use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use super::FallbackThrottle;
use crate::domain::corpus::{Corpus, QaPair};
use crate::domain::crag::{
    AnswerGenerator, CANNOT_RETRIEVE_MESSAGE, CragConfig, CragOutcome, CragStage,
    EvaluationResult, NO_CONTEXT_MESSAGE, RelevanceJudge, UNTRUSTED_ONLY_MESSAGE, WebFallback,
};
use crate::domain::ranking::{Bm25Index, RankedDocument};
use crate::domain::search::TrustedDomains;
use crate::domain::DomainError;

/// Corrective RAG pipeline over a fixed corpus
#[derive(Debug)]
pub struct CragPipeline {
    corpus: Corpus,
    index: Bm25Index,
    judge: Arc<dyn RelevanceJudge>,
    fallback: Arc<dyn WebFallback>,
    generator: Arc<dyn AnswerGenerator>,
    throttle: FallbackThrottle,
    trusted: TrustedDomains,
    config: CragConfig,
}

impl CragPipeline {
    /// Build the pipeline and its BM25 index. The index is reused for every query.
    pub fn new(
        corpus: Corpus,
        judge: Arc<dyn RelevanceJudge>,
        fallback: Arc<dyn WebFallback>,
        generator: Arc<dyn AnswerGenerator>,
        config: CragConfig,
    ) -> Self {
        let index = Bm25Index::build(corpus.documents());
        let throttle = FallbackThrottle::new(config.fallback_delay());
        let trusted = config.trusted();

        info!(
            documents = corpus.len(),
            trusted_domains = ?trusted.as_slice(),
            judge = judge.judge_name(),
            generator = generator.generator_name(),
            "CRAG pipeline ready"
        );

        Self {
            corpus,
            index,
            judge,
            fallback,
            generator,
            throttle,
            trusted,
            config,
        }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn config(&self) -> &CragConfig {
        &self.config
    }

    /// Best matching pair for the query
    pub fn rank(&self, query: &str) -> Result<(RankedDocument, &QaPair), DomainError> {
        let ranked = self.index.rank(query)?;
        let pair = self.corpus.get(ranked.index).ok_or_else(|| {
            DomainError::internal(format!("Ranked index {} out of bounds", ranked.index))
        })?;

        Ok((ranked, pair))
    }

    /// Rank the corpus and let the judge decide whether the best passage is enough
    pub async fn evaluate(&self, query: &str) -> Result<EvaluationResult, DomainError> {
        debug!(stage = %CragStage::Rank, "Ranking corpus");
        let (ranked, pair) = self.rank(query).map_err(|e| {
            error!(stage = %CragStage::Failed, error = %e, "Ranking failed");
            e
        })?;

        let context = pair.context(self.config.context);
        debug!(
            stage = %CragStage::Judge,
            ranked_index = ranked.index,
            score = ranked.score,
            "Judging ranked passage"
        );

        let verdict = self.judge.judge(query, context).await;
        self.throttle.record().await;

        if verdict?.is_approved() {
            info!(stage = %CragStage::Approved, ranked_index = ranked.index, "Local passage approved");
            Ok(EvaluationResult::Local {
                context: context.to_string(),
                ranked_index: ranked.index,
            })
        } else {
            info!(stage = %CragStage::Rejected, ranked_index = ranked.index, "Local passage rejected");
            Ok(EvaluationResult::NeedsWeb {
                query: query.to_string(),
                ranked_index: ranked.index,
            })
        }
    }

    /// Answer one query end to end
    #[instrument(skip(self), fields(query = %query))]
    pub async fn answer(&self, query: &str) -> Result<CragOutcome, DomainError> {
        let outcome = match self.evaluate(query).await? {
            EvaluationResult::Local {
                context,
                ranked_index,
            } => {
                debug!(stage = %CragStage::Generate, "Generating from local passage");
                let answer = self.generator.generate(query, &context).await?;
                CragOutcome::local(answer, ranked_index)
            }
            EvaluationResult::NeedsWeb {
                query: seed,
                ranked_index,
            } => self.answer_from_web(&seed, ranked_index).await?,
        };

        info!(
            stage = %CragStage::Done,
            went_to_web = outcome.went_to_web,
            advisory = outcome.advisory,
            context_source = ?outcome.context_source,
            "Query answered"
        );

        Ok(outcome)
    }

    async fn answer_from_web(
        &self,
        query: &str,
        ranked_index: usize,
    ) -> Result<CragOutcome, DomainError> {
        self.throttle.acquire().await;

        debug!(stage = %CragStage::WebFallback, "Falling back to web search");
        let web = match self.fallback.fallback(query, &self.trusted).await {
            Ok(web) => web,
            Err(e) => {
                warn!(stage = %CragStage::WebFallback, error = %e, "Web fallback failed");
                return Ok(CragOutcome::refusal(CANNOT_RETRIEVE_MESSAGE, false, ranked_index));
            }
        };

        let advisory = !web.had_safe_results;

        if web.summary.trim().is_empty() {
            warn!("Web fallback produced no usable summary");
            return Ok(CragOutcome::refusal(NO_CONTEXT_MESSAGE, advisory, ranked_index));
        }

        if advisory && self.config.require_trusted_sources {
            warn!("Only untrusted web results found and trusted sources are required");
            return Ok(CragOutcome::refusal(UNTRUSTED_ONLY_MESSAGE, advisory, ranked_index));
        }

        debug!(stage = %CragStage::Generate, advisory, "Generating from web summary");
        let answer = self.generator.generate(query, &web.summary).await?;

        Ok(CragOutcome::web(answer, advisory, ranked_index))
    }
}
