//! Corpus source implementations

mod json_source;

pub use json_source::JsonCorpusSource;
