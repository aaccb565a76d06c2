//! Infrastructure layer - External service implementations

pub mod corpus;
pub mod crag;
pub mod credentials;
pub mod llm;
pub mod logging;
pub mod search;
