use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::domain::{Credential, CredentialProvider, CredentialType, DomainError};

/// Credential provider that reads each key from the first line of its own file
#[derive(Debug)]
pub struct FileCredentialProvider {
    files: HashMap<CredentialType, PathBuf>,
}

impl FileCredentialProvider {
    pub fn new() -> Self {
        Self {
            files: HashMap::new(),
        }
    }

    pub fn with_file(mut self, credential_type: CredentialType, path: impl Into<PathBuf>) -> Self {
        self.files.insert(credential_type, path.into());
        self
    }

    /// One file per credential type, all inside `directory`
    pub fn in_directory(
        directory: impl AsRef<Path>,
        judge_file: &str,
        generation_file: &str,
        search_file: &str,
    ) -> Self {
        let directory = directory.as_ref();

        Self::new()
            .with_file(CredentialType::Judge, directory.join(judge_file))
            .with_file(CredentialType::Generation, directory.join(generation_file))
            .with_file(CredentialType::WebSearch, directory.join(search_file))
    }

    async fn read_credential(
        &self,
        credential_type: CredentialType,
    ) -> Result<Credential, DomainError> {
        let path = self.files.get(&credential_type).ok_or_else(|| {
            DomainError::credential_missing(format!(
                "No key file configured for credential type: {}",
                credential_type
            ))
        })?;

        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            DomainError::credential_missing(format!(
                "Cannot read key file '{}' for credential type {}: {}",
                path.display(),
                credential_type,
                e
            ))
        })?;

        let api_key = contents
            .lines()
            .next()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .ok_or_else(|| {
                DomainError::credential_missing(format!(
                    "Key file '{}' is empty for credential type: {}",
                    path.display(),
                    credential_type
                ))
            })?;

        Ok(Credential::new(credential_type, api_key))
    }
}

impl Default for FileCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialProvider for FileCredentialProvider {
    async fn get_credential(
        &self,
        credential_type: CredentialType,
    ) -> Result<Credential, DomainError> {
        self.read_credential(credential_type).await
    }

    fn provider_name(&self) -> &'static str {
        "file"
    }
}
