//! CRAG (Corrective RAG) infrastructure implementations
//!
//! LLM-backed judge, web fallback and answer generator, plus the pipeline that
//! sequences them.

mod answer_generator;
mod llm_judge;
mod pipeline;
mod throttle;
mod web_fallback;

pub use answer_generator::LlmAnswerGenerator;
pub use llm_judge::LlmRelevanceJudge;
pub use pipeline::CragPipeline;
pub use throttle::FallbackThrottle;
pub use web_fallback::LlmWebFallback;
