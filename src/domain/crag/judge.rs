//! Relevance judge trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::RelevanceVerdict;
use crate::domain::DomainError;

/// Decides whether a candidate passage answers a query
#[async_trait]
pub trait RelevanceJudge: Send + Sync + Debug {
    /// Malformed replies are a `Rejected` verdict, never an error. Errors are
    /// reserved for the model call itself failing.
    async fn judge(&self, query: &str, context: &str) -> Result<RelevanceVerdict, DomainError>;

    fn judge_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Mock judge returning a fixed verdict and recording what it was shown
    #[derive(Debug)]
    pub struct MockRelevanceJudge {
        verdict: RelevanceVerdict,
        error: Option<String>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl MockRelevanceJudge {
        pub fn approving() -> Self {
            Self::with_verdict(RelevanceVerdict::Approved)
        }

        pub fn rejecting() -> Self {
            Self::with_verdict(RelevanceVerdict::Rejected)
        }

        pub fn with_verdict(verdict: RelevanceVerdict) -> Self {
            Self {
                verdict,
                error: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        pub fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl RelevanceJudge for MockRelevanceJudge {
        async fn judge(&self, query: &str, context: &str) -> Result<RelevanceVerdict, DomainError> {
            self.calls
                .lock()
                .unwrap()
                .push((query.to_string(), context.to_string()));

            match self.error {
                Some(ref error) => Err(DomainError::provider("mock_judge", error)),
                None => Ok(self.verdict),
            }
        }

        fn judge_name(&self) -> &'static str {
            "mock"
        }
    }
}
