//! Answer generator trait

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::DomainError;

/// Produces the user-facing answer from a query and its selected context
#[async_trait]
pub trait AnswerGenerator: Send + Sync + Debug {
    async fn generate(&self, query: &str, context: &str) -> Result<String, DomainError>;

    fn generator_name(&self) -> &'static str;
}
