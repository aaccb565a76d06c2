use async_trait::async_trait;
use std::collections::HashMap;
use std::env;

use crate::domain::{Credential, CredentialProvider, CredentialType, DomainError};

/// Credential provider that reads from environment variables
#[derive(Debug)]
pub struct EnvCredentialProvider {
    mappings: HashMap<CredentialType, String>,
}

impl EnvCredentialProvider {
    pub fn new() -> Self {
        Self {
            mappings: HashMap::new(),
        }
    }

    pub fn with_mapping(mut self, credential_type: CredentialType, var: impl Into<String>) -> Self {
        self.mappings.insert(credential_type, var.into());
        self
    }

    /// Map every credential type to its conventional variable
    pub fn with_defaults(mut self) -> Self {
        for credential_type in CredentialType::ALL {
            self.mappings
                .insert(credential_type, credential_type.env_var().to_string());
        }
        self
    }

    fn read_credential(&self, credential_type: CredentialType) -> Result<Credential, DomainError> {
        let var = self.mappings.get(&credential_type).ok_or_else(|| {
            DomainError::credential_missing(format!(
                "No environment mapping configured for credential type: {}",
                credential_type
            ))
        })?;

        let api_key = env::var(var)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                DomainError::credential_missing(format!(
                    "Environment variable '{}' not set for credential type: {}",
                    var, credential_type
                ))
            })?;

        Ok(Credential::new(credential_type, api_key))
    }
}

impl Default for EnvCredentialProvider {
    fn default() -> Self {
        Self::new().with_defaults()
    }
}

#[async_trait]
impl CredentialProvider for EnvCredentialProvider {
    async fn get_credential(
        &self,
        credential_type: CredentialType,
    ) -> Result<Credential, DomainError> {
        self.read_credential(credential_type)
    }

    fn provider_name(&self) -> &'static str {
        "env"
    }
}
