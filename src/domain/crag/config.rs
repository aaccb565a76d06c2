//! CRAG configuration types

use serde::{Deserialize, Serialize};

use crate::domain::corpus::ContextSelection;
use crate::domain::search::TrustedDomains;

/// How the judge's raw reply is turned into a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JudgePolicy {
    /// Only the literal reply `Yes` approves
    #[default]
    Exact,
    /// Trimmed, case-insensitive, and a leading `yes` is enough
    Relaxed,
}

/// Configuration for the CRAG pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CragConfig {
    /// Link substrings treated as trusted; empty disables filtering
    #[serde(default = "default_trusted_domains")]
    pub trusted_domains: Vec<String>,
    /// Minimum pause between the judge call and the web search call
    #[serde(default = "default_fallback_delay_ms")]
    pub fallback_delay_ms: u64,
    /// Token budget for the final answer
    #[serde(default = "default_max_answer_tokens")]
    pub max_answer_tokens: u32,
    #[serde(default)]
    pub judge_policy: JudgePolicy,
    /// Refuse to answer from web results when none came from a trusted domain
    #[serde(default)]
    pub require_trusted_sources: bool,
    /// Log the full judge prompt and reply at info level
    #[serde(default)]
    pub verbose: bool,
    /// Which part of the ranked pair is judged and used for generation
    #[serde(default)]
    pub context: ContextSelection,
}

fn default_trusted_domains() -> Vec<String> {
    vec!["keytruda.com".to_string(), "wikipedia".to_string()]
}

fn default_fallback_delay_ms() -> u64 {
    1500
}

fn default_max_answer_tokens() -> u32 {
    120
}

impl Default for CragConfig {
    fn default() -> Self {
        Self {
            trusted_domains: default_trusted_domains(),
            fallback_delay_ms: default_fallback_delay_ms(),
            max_answer_tokens: default_max_answer_tokens(),
            judge_policy: JudgePolicy::default(),
            require_trusted_sources: false,
            verbose: false,
            context: ContextSelection::default(),
        }
    }
}

impl CragConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trusted_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.trusted_domains = domains.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_fallback_delay_ms(mut self, delay_ms: u64) -> Self {
        self.fallback_delay_ms = delay_ms;
        self
    }

    pub fn with_max_answer_tokens(mut self, tokens: u32) -> Self {
        self.max_answer_tokens = tokens;
        self
    }

    pub fn with_judge_policy(mut self, policy: JudgePolicy) -> Self {
        self.judge_policy = policy;
        self
    }

    pub fn with_require_trusted_sources(mut self, require: bool) -> Self {
        self.require_trusted_sources = require;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_context(mut self, context: ContextSelection) -> Self {
        self.context = context;
        self
    }

    pub fn trusted(&self) -> TrustedDomains {
        TrustedDomains::new(self.trusted_domains.iter().cloned())
    }

    pub fn fallback_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.fallback_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CragConfig::default();

        assert_eq!(config.trusted_domains, vec!["keytruda.com", "wikipedia"]);
        assert_eq!(config.fallback_delay_ms, 1500);
        assert_eq!(config.max_answer_tokens, 120);
        assert_eq!(config.judge_policy, JudgePolicy::Exact);
        assert!(!config.require_trusted_sources);
        assert!(!config.verbose);
        assert_eq!(config.context, ContextSelection::Document);
    }

    #[test]
    fn test_empty_section_deserializes_to_defaults() {
        let config: CragConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config.fallback_delay_ms, 1500);
        assert_eq!(config.trusted().as_slice().len(), 2);
    }

    #[test]
    fn test_builder_pattern() {
        let config = CragConfig::new()
            .with_trusted_domains(Vec::<String>::new())
            .with_fallback_delay_ms(0)
            .with_max_answer_tokens(64)
            .with_judge_policy(JudgePolicy::Relaxed)
            .with_require_trusted_sources(true)
            .with_verbose(true)
            .with_context(ContextSelection::Answer);

        assert!(config.trusted().is_empty());
        assert_eq!(config.fallback_delay(), std::time::Duration::ZERO);
        assert_eq!(config.max_answer_tokens, 64);
        assert_eq!(config.judge_policy, JudgePolicy::Relaxed);
        assert!(config.require_trusted_sources);
        assert!(config.verbose);
        assert_eq!(config.context, ContextSelection::Answer);
    }

    #[test]
    fn test_judge_policy_deserialization() {
        let policy: JudgePolicy = serde_json::from_str("\"relaxed\"").unwrap();
        assert_eq!(policy, JudgePolicy::Relaxed);
    }
}
