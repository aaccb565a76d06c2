use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::DomainError;

/// One organic search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub snippet: String,
    pub link: String,
}

impl SearchHit {
    pub fn new(snippet: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            snippet: snippet.into(),
            link: link.into(),
        }
    }
}

/// Trait for web search backends
#[async_trait]
pub trait WebSearchProvider: Send + Sync + Debug {
    /// Run a search. Transport or auth failures are `SearchUnavailable`.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, DomainError>;

    fn provider_name(&self) -> &'static str;
}
