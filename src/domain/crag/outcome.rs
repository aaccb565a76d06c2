//! Final pipeline outcome

use serde::{Deserialize, Serialize};

/// Refusal when the web search itself failed
pub const CANNOT_RETRIEVE_MESSAGE: &str =
    "I cannot retrieve current information to answer this query right now.";

/// Refusal when neither the corpus nor the web produced usable context
pub const NO_CONTEXT_MESSAGE: &str =
    "I can't answer this query due to a lack of proper information.";

/// Refusal when only untrusted web results were found and they are not allowed
pub const UNTRUSTED_ONLY_MESSAGE: &str =
    "I can't answer this query: no results came from a trusted source.";

/// Where the generation context came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextSource {
    /// The ranked corpus passage
    Local,
    /// The summarized web search
    Web,
    /// No usable context; the answer is a refusal
    None,
}

/// Answer plus the diagnostic flags carried through the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CragOutcome {
    pub answer: String,
    /// The trusted-domain filter was requested but nothing matched it
    pub advisory: bool,
    pub went_to_web: bool,
    pub context_source: ContextSource,
    /// Position of the best BM25 match in the corpus
    pub ranked_index: usize,
}

impl CragOutcome {
    pub fn local(answer: impl Into<String>, ranked_index: usize) -> Self {
        Self {
            answer: answer.into(),
            advisory: false,
            went_to_web: false,
            context_source: ContextSource::Local,
            ranked_index,
        }
    }

    pub fn web(answer: impl Into<String>, advisory: bool, ranked_index: usize) -> Self {
        Self {
            answer: answer.into(),
            advisory,
            went_to_web: true,
            context_source: ContextSource::Web,
            ranked_index,
        }
    }

    /// An explicit refusal after the web stage
    pub fn refusal(message: &str, advisory: bool, ranked_index: usize) -> Self {
        Self {
            answer: message.to_string(),
            advisory,
            went_to_web: true,
            context_source: ContextSource::None,
            ranked_index,
        }
    }

    pub fn is_refusal(&self) -> bool {
        self.context_source == ContextSource::None
    }
}
