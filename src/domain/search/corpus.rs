use serde::{Deserialize, Serialize};

use super::SearchHit;

/// Substring allow-list applied to result links
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrustedDomains(Vec<String>);

impl TrustedDomains {
    /// Blank entries are dropped so they cannot match every link
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            domains
                .into_iter()
                .map(Into::into)
                .map(|d: String| d.trim().to_string())
                .filter(|d| !d.is_empty())
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Whether the link contains any trusted substring
    pub fn matches(&self, link: &str) -> bool {
        self.0.iter().any(|domain| link.contains(domain.as_str()))
    }
}

/// Snippets gathered from one search, before summarization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebCorpus {
    /// Text handed to the summarizer
    pub text: String,
    /// `false` only when a filter was requested and nothing matched it
    pub had_safe_results: bool,
}

impl WebCorpus {
    /// Concatenate snippets, preferring those from trusted links.
    ///
    /// Every snippet is appended to the open corpus with a leading space; the
    /// ones whose link matches the allow-list are also appended to the safe
    /// corpus. With no allow-list the open corpus is used as is. With an
    /// allow-list the safe corpus wins if it is non-empty, otherwise the open
    /// corpus is returned and flagged.
    pub fn from_hits(hits: &[SearchHit], trusted: &TrustedDomains) -> Self {
        let mut open = String::new();
        let mut safe = String::new();

        for hit in hits {
            open.push(' ');
            open.push_str(&hit.snippet);

            if trusted.matches(&hit.link) {
                safe.push(' ');
                safe.push_str(&hit.snippet);
            }
        }

        if trusted.is_empty() {
            Self {
                text: open,
                had_safe_results: true,
            }
        } else if !safe.is_empty() {
            Self {
                text: safe,
                had_safe_results: true,
            }
        } else {
            Self {
                text: open,
                had_safe_results: false,
            }
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Result of the web fallback stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSearchOutcome {
    pub summary: String,
    pub had_safe_results: bool,
}
