//! Domain layer - Core business logic and entities

pub mod corpus;
pub mod crag;
pub mod credentials;
pub mod error;
pub mod llm;
pub mod ranking;
pub mod search;

pub use corpus::{ContextSelection, Corpus, CorpusSource, QaPair};
pub use crag::{
    AnswerGenerator, ContextSource, CragConfig, CragOutcome, CragStage, EvaluationResult,
    JudgePolicy, RelevanceJudge, RelevanceVerdict, WebFallback,
};
pub use credentials::{Credential, CredentialProvider, CredentialType, Secrets};
pub use error::DomainError;
pub use llm::{
    FinishReason, LlmProvider, LlmRequest, LlmRequestBuilder, LlmResponse, Message, MessageRole,
    SafetySettings, Usage,
};
pub use ranking::{Bm25Index, Bm25Params, RankedDocument};
pub use search::{SearchHit, TrustedDomains, WebCorpus, WebSearchOutcome, WebSearchProvider};
