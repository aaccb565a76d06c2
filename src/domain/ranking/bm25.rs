use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::tokenize;
use crate::domain::DomainError;

/// Okapi BM25 tuning parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bm25Params {
    /// Term frequency saturation
    pub k1: f64,
    /// Document length normalization
    pub b: f64,
    /// Fraction of the mean IDF used as the floor for negative IDFs
    pub epsilon: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self {
            k1: 1.5,
            b: 0.75,
            epsilon: 0.25,
        }
    }
}

/// Position and score of a ranked document
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedDocument {
    pub index: usize,
    pub score: f64,
}

/// In-memory BM25 index over a fixed document set
#[derive(Debug, Clone)]
pub struct Bm25Index {
    params: Bm25Params,
    term_freqs: Vec<HashMap<String, u32>>,
    doc_lengths: Vec<usize>,
    avg_doc_length: f64,
    idf: HashMap<String, f64>,
}

impl Bm25Index {
    /// Build an index with default parameters
    pub fn build<'a, I>(documents: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self::with_params(documents, Bm25Params::default())
    }

    pub fn with_params<'a, I>(documents: I, params: Bm25Params) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut term_freqs = Vec::new();
        let mut doc_lengths = Vec::new();
        // Ordered so the IDF sum, and with it the floor, is identical on every build
        let mut doc_counts: BTreeMap<String, u32> = BTreeMap::new();

        for document in documents {
            let tokens = tokenize(document);
            doc_lengths.push(tokens.len());

            let mut freqs: HashMap<String, u32> = HashMap::new();
            for token in tokens {
                *freqs.entry(token).or_insert(0) += 1;
            }

            for term in freqs.keys() {
                *doc_counts.entry(term.clone()).or_insert(0) += 1;
            }

            term_freqs.push(freqs);
        }

        let corpus_size = doc_lengths.len();
        let total_length: usize = doc_lengths.iter().sum();
        let avg_doc_length = if corpus_size == 0 {
            0.0
        } else {
            total_length as f64 / corpus_size as f64
        };

        let idf = compute_idf(&doc_counts, corpus_size, params.epsilon);

        Self {
            params,
            term_freqs,
            doc_lengths,
            avg_doc_length,
            idf,
        }
    }

    pub fn len(&self) -> usize {
        self.doc_lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc_lengths.is_empty()
    }

    pub fn params(&self) -> &Bm25Params {
        &self.params
    }

    /// Score every document against the query, in corpus order
    pub fn scores(&self, query: &str) -> Vec<f64> {
        let query_tokens = tokenize(query);
        let Bm25Params { k1, b, .. } = self.params;

        self.term_freqs
            .iter()
            .zip(&self.doc_lengths)
            .map(|(freqs, &doc_length)| {
                let length_ratio = if self.avg_doc_length > 0.0 {
                    doc_length as f64 / self.avg_doc_length
                } else {
                    1.0
                };

                query_tokens
                    .iter()
                    .map(|token| {
                        let tf = freqs.get(token).copied().unwrap_or(0) as f64;
                        let idf = self.idf.get(token).copied().unwrap_or(0.0);
                        idf * (tf * (k1 + 1.0)) / (tf + k1 * (1.0 - b + b * length_ratio))
                    })
                    .sum()
            })
            .collect()
    }

    /// Best matching document; ties resolve to the earliest position
    pub fn rank(&self, query: &str) -> Result<RankedDocument, DomainError> {
        let scores = self.scores(query);

        let mut iter = scores.into_iter().enumerate();
        let (first_index, first_score) = iter.next().ok_or(DomainError::EmptyCorpus)?;

        let best = iter.fold(
            RankedDocument {
                index: first_index,
                score: first_score,
            },
            |best, (index, score)| {
                if score > best.score {
                    RankedDocument { index, score }
                } else {
                    best
                }
            },
        );

        Ok(best)
    }
}

fn compute_idf(
    doc_counts: &BTreeMap<String, u32>,
    corpus_size: usize,
    epsilon: f64,
) -> HashMap<String, f64> {
    let n = corpus_size as f64;
    let mut idf = HashMap::with_capacity(doc_counts.len());
    let mut idf_sum = 0.0;
    let mut negative_terms = Vec::new();

    for (term, &count) in doc_counts {
        let df = count as f64;
        let value = (n - df + 0.5).ln() - (df + 0.5).ln();
        idf_sum += value;
        if value < 0.0 {
            negative_terms.push(term.clone());
        }
        idf.insert(term.clone(), value);
    }

    if !idf.is_empty() {
        let floor = epsilon * idf_sum / idf.len() as f64;
        for term in negative_terms {
            idf.insert(term, floor);
        }
    }

    idf
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_docs() -> Vec<&'static str> {
        vec![
            "Question: What is Keytruda?:\n Answer: Keytruda is an immunotherapy drug.",
            "Question: How is Keytruda administered?:\n Answer: By intravenous infusion.",
            "Question: What are common side effects?:\n Answer: Fatigue, rash and nausea.",
            "Question: Who makes the drug?:\n Answer: It is made by Merck.",
        ]
    }

    #[test]
    fn test_rank_selects_best_match() {
        let index = Bm25Index::build(sample_docs());

        let ranked = index.rank("how is keytruda administered").unwrap();
        assert_eq!(ranked.index, 1);

        let ranked = index.rank("common side effects").unwrap();
        assert_eq!(ranked.index, 2);

        let ranked = index.rank("Who makes it? Merck?").unwrap();
        assert_eq!(ranked.index, 3);
    }

    #[test]
    fn test_rank_empty_corpus() {
        let index = Bm25Index::build(Vec::<&str>::new());

        assert!(index.is_empty());
        assert!(matches!(
            index.rank("anything"),
            Err(DomainError::EmptyCorpus)
        ));
    }

    #[test]
    fn test_rank_index_in_bounds() {
        let docs = sample_docs();
        let index = Bm25Index::build(docs.clone());

        for query in ["", "?", "zzz unknown words", "keytruda", "answer question"] {
            let ranked = index.rank(query).unwrap();
            assert!(ranked.index < docs.len(), "query {:?}", query);
        }
    }

    #[test]
    fn test_rank_is_deterministic() {
        let index = Bm25Index::build(sample_docs());
        let first = index.rank("what is keytruda").unwrap();

        for _ in 0..10 {
            let rebuilt = Bm25Index::build(sample_docs());
            assert_eq!(rebuilt.rank("what is keytruda").unwrap(), first);
            assert_eq!(index.rank("what is keytruda").unwrap(), first);
        }
    }

    #[test]
    fn test_identical_builds_score_identically() {
        let query = "what is keytruda";
        let expected = Bm25Index::build(sample_docs()).scores(query);

        for _ in 0..50 {
            let scores = Bm25Index::build(sample_docs()).scores(query);
            assert_eq!(scores, expected);
        }
    }

    #[test]
    fn test_two_document_corpus_has_zero_idf_for_unique_terms() {
        // With N = 2 a term found in one document has idf ln(1.5) - ln(1.5) = 0,
        // so only shared (floored, negative) terms move the scores.
        let index = Bm25Index::build(["alpha common", "beta common"]);

        assert_eq!(index.idf.get("alpha").copied(), Some(0.0));
        assert_eq!(index.idf.get("beta").copied(), Some(0.0));
        assert!(index.idf.get("common").copied().unwrap() < 0.0);

        assert_eq!(index.scores("beta"), vec![0.0, 0.0]);
        assert_eq!(index.rank("beta").unwrap().index, 0);
    }

    #[test]
    fn test_ties_resolve_to_first_occurrence() {
        let index = Bm25Index::build([
            "same text",
            "same text",
            "other words",
            "more words",
            "extra words",
        ]);
        assert_eq!(index.rank("same").unwrap().index, 0);

        // No overlapping terms: every score is zero
        assert_eq!(index.rank("unrelated").unwrap().index, 0);
    }

    #[test]
    fn test_single_document_corpus() {
        let index = Bm25Index::build(["Question: What is X?\n Answer: X is Y."]);
        let ranked = index.rank("What is X?").unwrap();
        assert_eq!(ranked.index, 0);
    }

    #[test]
    fn test_negative_idf_floored() {
        // "common" appears in every document, so its raw IDF is negative
        let index = Bm25Index::build(["common alpha", "common beta", "common gamma"]);
        let idf = index.idf.get("common").copied().unwrap();
        let alpha = index.idf.get("alpha").copied().unwrap();
        let raw = (0.5f64).ln() - (3.5f64).ln();

        assert!(alpha > 0.0);
        assert!(idf > raw);
        assert!(idf.abs() < alpha);
    }

    #[test]
    fn test_rarer_terms_weigh_more() {
        let index = Bm25Index::build(["apple banana", "apple cherry", "apple date", "fig"]);
        let scores = index.scores("cherry");
        assert!(scores[1] > scores[0]);
        assert_eq!(scores[0], 0.0);
    }

    #[test]
    fn test_empty_documents_do_not_produce_nan() {
        let index = Bm25Index::build(["", ""]);
        let scores = index.scores("anything");
        assert!(scores.iter().all(|s| s.is_finite()));
        assert_eq!(index.rank("anything").unwrap().index, 0);
    }
}
