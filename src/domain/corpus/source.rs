use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::Corpus;
use crate::domain::DomainError;

/// Loads a validated corpus from wherever it is stored
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CorpusSource: Send + Sync {
    /// Load the full corpus
    async fn load(&self) -> Result<Corpus, DomainError>;

    /// Human-readable description for logging
    fn describe(&self) -> String;
}
