use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

use super::{EnvCredentialProvider, FileCredentialProvider};
use crate::domain::{CredentialProvider, CredentialType};

/// Where API keys come from
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// Unset variable names fall back to `GEMINI_API_KEY`, `OPENAI_API_KEY`
    /// and `SERPER_API_KEY`
    Env {
        #[serde(default)]
        judge_var: Option<String>,
        #[serde(default)]
        generation_var: Option<String>,
        #[serde(default)]
        search_var: Option<String>,
    },
    File {
        #[serde(default = "default_directory")]
        directory: PathBuf,
        #[serde(default = "default_judge_file")]
        judge_file: String,
        #[serde(default = "default_generation_file")]
        generation_file: String,
        #[serde(default = "default_search_file")]
        search_file: String,
    },
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::Env {
            judge_var: None,
            generation_var: None,
            search_var: None,
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from("APIS")
}

fn default_judge_file() -> String {
    "Gemini.txt".to_string()
}

fn default_generation_file() -> String {
    "gpt.txt".to_string()
}

fn default_search_file() -> String {
    "serper.txt".to_string()
}

/// Factory for creating credential providers
#[derive(Debug)]
pub struct CredentialProviderFactory;

impl CredentialProviderFactory {
    /// Create a credential provider from configuration
    pub fn create(config: &ProviderConfig) -> Arc<dyn CredentialProvider> {
        match config {
            ProviderConfig::Env {
                judge_var,
                generation_var,
                search_var,
            } => {
                let overrides = [
                    (CredentialType::Judge, judge_var),
                    (CredentialType::Generation, generation_var),
                    (CredentialType::WebSearch, search_var),
                ];
                let provider = overrides.into_iter().fold(
                    EnvCredentialProvider::default(),
                    |provider, (credential_type, var)| match var {
                        Some(var) => provider.with_mapping(credential_type, var.as_str()),
                        None => provider,
                    },
                );
                Arc::new(provider)
            }

            ProviderConfig::File {
                directory,
                judge_file,
                generation_file,
                search_file,
            } => Arc::new(FileCredentialProvider::in_directory(
                directory,
                judge_file,
                generation_file,
                search_file,
            )),
        }
    }
}
