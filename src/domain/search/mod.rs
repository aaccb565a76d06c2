//! Web search domain
//!
//! Search hits, the search capability, and the trusted-domain filter that turns
//! a list of hits into the corpus handed to the summarizer.

mod corpus;
mod provider;

pub use corpus::{TrustedDomains, WebCorpus, WebSearchOutcome};
pub use provider::{SearchHit, WebSearchProvider};

#[cfg(test)]
pub use provider::mock::MockWebSearchProvider;
