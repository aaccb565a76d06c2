use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A single question/answer pair from the corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    /// Question text
    pub question: String,
    /// Answer text
    pub answer: String,
    /// Text that is tokenized and ranked
    pub document: String,
}

impl QaPair {
    /// Create a pair whose document is rendered from the question and answer
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        let question = question.into();
        let answer = answer.into();
        let document = Self::render_document(&question, &answer);

        Self {
            question,
            answer,
            document,
        }
    }

    /// Create a pair from a pre-rendered document; question and answer mirror it
    pub fn from_document(document: impl Into<String>) -> Self {
        let document = document.into();

        Self {
            question: document.clone(),
            answer: document.clone(),
            document,
        }
    }

    /// Override the rendered document text
    pub fn with_document(mut self, document: impl Into<String>) -> Self {
        self.document = document.into();
        self
    }

    /// Default document layout: `Question: <q>:\n Answer: <a>`
    pub fn render_document(question: &str, answer: &str) -> String {
        format!("Question: {}:\n Answer: {}", question, answer)
    }

    /// Text handed to the judge and generator for this pair
    pub fn context(&self, selection: ContextSelection) -> &str {
        match selection {
            ContextSelection::Document => &self.document,
            ContextSelection::Answer => &self.answer,
        }
    }
}

/// Which part of a ranked pair becomes the candidate context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextSelection {
    /// The full ranked document (question and answer)
    #[default]
    Document,
    /// Only the answer paired with the ranked document
    Answer,
}

/// Immutable, shareable corpus of question/answer pairs
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pairs: Arc<[QaPair]>,
}

impl Corpus {
    pub fn new(pairs: Vec<QaPair>) -> Self {
        Self {
            pairs: pairs.into(),
        }
    }

    /// Build a corpus where every entry is a bare document string
    pub fn from_documents<I, S>(documents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(documents.into_iter().map(QaPair::from_document).collect())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&QaPair> {
        self.pairs.get(index)
    }

    pub fn pairs(&self) -> &[QaPair] {
        &self.pairs
    }

    /// Document texts in corpus order
    pub fn documents(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|p| p.document.as_str())
    }
}

impl FromIterator<QaPair> for Corpus {
    fn from_iter<T: IntoIterator<Item = QaPair>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
