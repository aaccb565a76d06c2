//! Web fallback trait

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::DomainError;
use crate::domain::search::{TrustedDomains, WebSearchOutcome};

/// Answers a query from the web when the local corpus could not
#[async_trait]
pub trait WebFallback: Send + Sync + Debug {
    /// `SearchUnavailable` when the search provider fails outright. A trust
    /// filter that matched nothing is reported through the outcome flag.
    async fn fallback(
        &self,
        query: &str,
        trusted: &TrustedDomains,
    ) -> Result<WebSearchOutcome, DomainError>;
}
