use std::fmt;

use serde::{Deserialize, Serialize};

/// Which external service a credential unlocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialType {
    /// Model used for relevance judgement, query compression and summarization
    Judge,
    /// Model used for final answer generation
    Generation,
    /// Web search API
    WebSearch,
}

impl CredentialType {
    pub const ALL: [CredentialType; 3] = [
        CredentialType::Judge,
        CredentialType::Generation,
        CredentialType::WebSearch,
    ];

    /// Environment variable the key is read from by default
    pub fn env_var(&self) -> &'static str {
        match self {
            CredentialType::Judge => "GEMINI_API_KEY",
            CredentialType::Generation => "OPENAI_API_KEY",
            CredentialType::WebSearch => "SERPER_API_KEY",
        }
    }
}

impl fmt::Display for CredentialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialType::Judge => write!(f, "judge"),
            CredentialType::Generation => write!(f, "generation"),
            CredentialType::WebSearch => write!(f, "web_search"),
        }
    }
}

/// An API key fetched from a credential provider
#[derive(Clone)]
pub struct Credential {
    credential_type: CredentialType,
    api_key: String,
}

impl Credential {
    pub fn new(credential_type: CredentialType, api_key: impl Into<String>) -> Self {
        Self {
            credential_type,
            api_key: api_key.into(),
        }
    }

    pub fn credential_type(&self) -> CredentialType {
        self.credential_type
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn into_api_key(self) -> String {
        self.api_key
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("credential_type", &self.credential_type)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}
