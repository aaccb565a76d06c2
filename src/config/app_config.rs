use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::CragConfig;
use crate::infrastructure::credentials::ProviderConfig;
use crate::infrastructure::llm::LlmProviderKind;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub credentials: ProviderConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub crag: CragConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorpusConfig {
    /// JSON file of question/answer records
    #[serde(default = "default_corpus_path")]
    pub path: PathBuf,
}

/// Model backends used by the pipeline
#[derive(Debug, Clone, Deserialize)]
pub struct ProvidersConfig {
    /// Backend for the judge, query compression and web summarization
    #[serde(default = "default_judge_provider")]
    pub judge_provider: LlmProviderKind,
    #[serde(default = "default_generation_provider")]
    pub generation_provider: LlmProviderKind,
    #[serde(default = "default_judge_model")]
    pub judge_model: String,
    #[serde(default = "default_generation_model")]
    pub generation_model: String,
    #[serde(default)]
    pub judge_base_url: Option<String>,
    #[serde(default)]
    pub generation_base_url: Option<String>,
    #[serde(default)]
    pub search_base_url: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_corpus_path() -> PathBuf {
    PathBuf::from("data/corpus.json")
}

fn default_judge_provider() -> LlmProviderKind {
    LlmProviderKind::Gemini
}

fn default_generation_provider() -> LlmProviderKind {
    LlmProviderKind::OpenAi
}

fn default_judge_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_generation_model() -> String {
    "gpt-4o".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: default_corpus_path(),
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            judge_provider: default_judge_provider(),
            generation_provider: default_generation_provider(),
            judge_model: default_judge_model(),
            generation_model: default_generation_model(),
            judge_base_url: None,
            generation_base_url: None,
            search_base_url: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ProvidersConfig {
    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }
}

impl AppConfig {
    /// Load `config/default`, then `config/local`, then `extra` if given, then
    /// `CRAG__*` environment variables. Later sources win.
    pub fn load(extra: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false));

        if let Some(path) = extra {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("CRAG")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("crag.trusted_domains")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContextSelection, JudgePolicy};
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.credentials, ProviderConfig::default());
        assert_eq!(config.providers.judge_provider, LlmProviderKind::Gemini);
        assert_eq!(config.providers.generation_provider, LlmProviderKind::OpenAi);
        assert_eq!(config.providers.judge_model, "gemini-2.0-flash");
        assert_eq!(config.providers.generation_model, "gpt-4o");
        assert_eq!(config.providers.request_timeout_secs, 30);
        assert_eq!(config.crag.fallback_delay_ms, 1500);
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(
            r#"
[logging]
format = "json"

[corpus]
path = "keytruda.json"

[credentials]
source = "file"
directory = "secrets"

[providers]
judge_provider = "openai"
judge_model = "gpt-4o-mini"

[crag]
trusted_domains = ["merck.com"]
judge_policy = "relaxed"
require_trusted_sources = true
context = "answer"
"#,
        );

        let config = AppConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.corpus.path, PathBuf::from("keytruda.json"));
        assert!(matches!(
            config.credentials,
            ProviderConfig::File { ref directory, ref judge_file, .. }
                if directory == Path::new("secrets") && judge_file == "Gemini.txt"
        ));
        assert_eq!(config.providers.judge_provider, LlmProviderKind::OpenAi);
        assert_eq!(config.providers.judge_model, "gpt-4o-mini");
        assert_eq!(config.providers.generation_model, "gpt-4o");
        assert_eq!(config.crag.trusted_domains, vec!["merck.com"]);
        assert_eq!(config.crag.judge_policy, JudgePolicy::Relaxed);
        assert!(config.crag.require_trusted_sources);
        assert_eq!(config.crag.context, ContextSelection::Answer);
        assert_eq!(config.crag.fallback_delay_ms, 1500);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = AppConfig::load(Some(Path::new("/nonexistent/crag.toml")));
        assert!(result.is_err());
    }
}
