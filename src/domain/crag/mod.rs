//! CRAG (Corrective RAG) domain
//!
//! Types and traits for the corrective retrieval flow: a ranked local passage
//! is judged, and a rejected passage sends the query to the web before an
//! answer is generated from whichever context survived.

mod config;
mod fallback;
mod generator;
mod judge;
mod outcome;
mod verdict;

pub use config::{CragConfig, JudgePolicy};
pub use fallback::WebFallback;
pub use generator::AnswerGenerator;
pub use judge::RelevanceJudge;
pub use outcome::{
    CANNOT_RETRIEVE_MESSAGE, ContextSource, CragOutcome, NO_CONTEXT_MESSAGE,
    UNTRUSTED_ONLY_MESSAGE,
};
pub use verdict::{CragStage, EvaluationResult, RelevanceVerdict};

#[cfg(test)]
pub use fallback::mock::MockWebFallback;
#[cfg(test)]
pub use generator::mock::MockAnswerGenerator;
#[cfg(test)]
pub use judge::mock::MockRelevanceJudge;
