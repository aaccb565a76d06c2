use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::domain::{Corpus, CorpusSource, DomainError, QaPair};

/// One record of the JSON dataset
#[derive(Debug, Deserialize)]
struct QaRecord {
    #[serde(default)]
    question: String,
    #[serde(default)]
    answer: String,
    /// Pre-rendered searchable text; rendered from question and answer when absent
    #[serde(default)]
    document: Option<String>,
}

/// Loads a question/answer corpus from a JSON array file
#[derive(Debug, Clone)]
pub struct JsonCorpusSource {
    path: PathBuf,
}

impl JsonCorpusSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(&self, contents: &str) -> Result<Corpus, DomainError> {
        let records: Vec<QaRecord> = serde_json::from_str(contents).map_err(|e| {
            DomainError::corpus(format!(
                "Invalid corpus file '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        let total = records.len();
        let corpus: Corpus = records
            .into_iter()
            .enumerate()
            .filter_map(|(position, record)| {
                let question = record.question.trim();
                let answer = record.answer.trim();

                if question.is_empty() && answer.is_empty() {
                    warn!(position, "Skipping corpus record without question or answer");
                    return None;
                }

                let pair = QaPair::new(question, answer);
                Some(match record.document {
                    Some(document) if !document.trim().is_empty() => pair.with_document(document),
                    _ => pair,
                })
            })
            .collect();

        info!(
            path = %self.path.display(),
            pairs = corpus.len(),
            skipped = total - corpus.len(),
            "Question/answer pairs extracted"
        );

        Ok(corpus)
    }
}

#[async_trait]
impl CorpusSource for JsonCorpusSource {
    async fn load(&self) -> Result<Corpus, DomainError> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            DomainError::corpus(format!(
                "Cannot read corpus file '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        self.parse(&contents)
    }

    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }
}
