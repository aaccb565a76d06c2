//! Question/answer corpus domain
//!
//! A corpus is an ordered, read-only sequence of question/answer pairs. Each
//! pair carries the searchable document text alongside the question and answer
//! it was built from, so ranking positions never need a second parallel array.

mod entity;
mod source;

pub use entity::{Corpus, ContextSelection, QaPair};
pub use source::CorpusSource;

#[cfg(test)]
pub use source::MockCorpusSource;
