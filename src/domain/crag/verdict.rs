//! Relevance verdicts and stage results

use serde::{Deserialize, Serialize};
use std::fmt;

use super::JudgePolicy;

/// The judge's decision on a candidate passage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelevanceVerdict {
    Approved,
    Rejected,
}

impl RelevanceVerdict {
    /// Parse a raw model reply. Anything the policy does not accept as a yes,
    /// including empty or malformed output, is a rejection.
    pub fn from_reply(raw: &str, policy: JudgePolicy) -> Self {
        let approved = match policy {
            JudgePolicy::Exact => raw == "Yes",
            JudgePolicy::Relaxed => raw.trim().to_lowercase().starts_with("yes"),
        };

        if approved { Self::Approved } else { Self::Rejected }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

/// Outcome of ranking plus judging for one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluationResult {
    /// The ranked passage was approved and becomes the context
    Local { context: String, ranked_index: usize },
    /// The ranked passage was rejected; the original query seeds the web search
    NeedsWeb { query: String, ranked_index: usize },
}

impl EvaluationResult {
    pub fn ranked_index(&self) -> usize {
        match self {
            Self::Local { ranked_index, .. } | Self::NeedsWeb { ranked_index, .. } => {
                *ranked_index
            }
        }
    }

    pub fn needs_web(&self) -> bool {
        matches!(self, Self::NeedsWeb { .. })
    }
}

/// Stages of a single query's lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CragStage {
    Rank,
    Judge,
    Approved,
    Rejected,
    WebFallback,
    Generate,
    Done,
    Failed,
}

impl fmt::Display for CragStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CragStage::Rank => "rank",
            CragStage::Judge => "judge",
            CragStage::Approved => "approved",
            CragStage::Rejected => "rejected",
            CragStage::WebFallback => "web_fallback",
            CragStage::Generate => "generate",
            CragStage::Done => "done",
            CragStage::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}
