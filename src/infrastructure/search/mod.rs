//! Web search provider implementations

mod serper;

pub use serper::SerperSearchProvider;
