//! Lexical ranking
//!
//! Okapi BM25 over a case-insensitive word tokenization. The index is built
//! once per corpus and can rank any number of queries afterwards.

mod bm25;
mod tokenizer;

pub use bm25::{Bm25Index, Bm25Params, RankedDocument};
pub use tokenizer::tokenize;
